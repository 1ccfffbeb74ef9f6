use opt_core::Opt;

use crate::key::NodeKey;

/// Definition of a node and the node that precedes it, if any.
pub trait ConnectionDef {
  fn key(&self) -> &NodeKey;

  fn prev_node(&self) -> Opt<&NodeKey>;
}

/// Plain [connection definition](ConnectionDef).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Connection {
  pub key: NodeKey,
  pub prev: Opt<NodeKey>,
}

impl Connection {
  #[inline]
  pub fn new(key: NodeKey, prev: impl Into<Option<NodeKey>>) -> Self {
    Self { key, prev: Opt::of(prev) }
  }
  #[inline]
  pub fn start(key: NodeKey) -> Self {
    Self { key, prev: Opt::Absent }
  }
  #[inline]
  pub fn after(key: NodeKey, prev: NodeKey) -> Self {
    Self { key, prev: Opt::Present(prev) }
  }
}

impl ConnectionDef for Connection {
  #[inline]
  fn key(&self) -> &NodeKey { &self.key }

  #[inline]
  fn prev_node(&self) -> Opt<&NodeKey> { self.prev.as_ref() }
}

impl<C: ConnectionDef + ?Sized> ConnectionDef for &C {
  #[inline]
  fn key(&self) -> &NodeKey { (**self).key() }

  #[inline]
  fn prev_node(&self) -> Opt<&NodeKey> { (**self).prev_node() }
}
