use std::ops::Index;

use hashlink::LinkedHashMap;
use opt_core::Opt;

use crate::connection::ConnectionDef;
use crate::error::GraphError;
use crate::key::NodeKey;

/// Identifier of a node within the [graph](NodeGraph) that created it.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
  #[inline]
  pub fn index(self) -> usize { self.0 }
}

/// Node of a [graph](NodeGraph), related vertically to its parent and children, and horizontally to its
/// predecessors and successors.
#[derive(Clone, Debug)]
pub struct Node {
  key: NodeKey,
  parent: Opt<NodeId>,
  children: Vec<NodeId>,
  predecessors: Vec<NodeId>,
  successors: Vec<NodeId>,
}

impl Node {
  #[inline]
  pub fn key(&self) -> &NodeKey { &self.key }
  #[inline]
  pub fn parent(&self) -> Opt<NodeId> { self.parent }
  #[inline]
  pub fn children(&self) -> &[NodeId] { &self.children }
  #[inline]
  pub fn predecessors(&self) -> &[NodeId] { &self.predecessors }
  #[inline]
  pub fn successors(&self) -> &[NodeId] { &self.successors }
}

/// Registry of nodes by key, owning every node of one graph.
///
/// Nodes are only created through [get_or_create](Self::get_or_create): requesting a key that is already registered
/// returns the existing node, and nodes are never removed. Missing ancestors are created along with a node, so every
/// node's parent is registered in the same graph.
///
/// [Node ids](NodeId) are only meaningful for the graph that created them; passing an id from another graph to
/// [node](Self::node) or [connect](Self::connect) panics if it is out of bounds.
#[derive(Default, Clone, Debug)]
pub struct NodeGraph {
  nodes: Vec<Node>,
  ids: LinkedHashMap<NodeKey, NodeId>,
}

impl NodeGraph {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Creates a graph from `connections`, in order.
  pub fn from_connections<C: ConnectionDef>(connections: impl IntoIterator<Item=C>) -> Self {
    let mut graph = Self::new();
    for connection in connections {
      graph.add_connection(&connection);
    }
    graph
  }


  #[inline]
  pub fn len(&self) -> usize { self.nodes.len() }
  #[inline]
  pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

  #[inline]
  pub fn contains(&self, key: &NodeKey) -> bool { self.ids.contains_key(key) }

  #[inline]
  pub fn get(&self, key: &NodeKey) -> Opt<NodeId> {
    Opt::of(self.ids.get(key).copied())
  }

  #[inline]
  pub fn get_node(&self, key: &NodeKey) -> Opt<&Node> {
    self.get(key).map(|id| self.node(id))
  }

  #[inline]
  pub fn node(&self, id: NodeId) -> &Node { &self.nodes[id.0] }

  #[inline]
  pub fn parent_node(&self, id: NodeId) -> Opt<&Node> {
    self.node(id).parent.map(|parent| self.node(parent))
  }

  /// Iterates over all nodes in creation order. Ancestors are always created before their descendants.
  #[inline]
  pub fn nodes(&self) -> impl Iterator<Item=(NodeId, &Node)> {
    self.ids.values().map(|id| (*id, self.node(*id)))
  }

  /// Iterates over nodes without a parent, in creation order.
  #[inline]
  pub fn roots(&self) -> impl Iterator<Item=(NodeId, &Node)> {
    self.nodes().filter(|(_, node)| node.parent.is_absent())
  }


  /// Returns the node for `key`, creating it and any missing ancestors if it is not registered yet.
  pub fn get_or_create(&mut self, key: &NodeKey) -> NodeId {
    if let Opt::Present(id) = self.get(key) {
      return id;
    }

    // Walk up to the nearest registered ancestor, then create the missing ones outermost first.
    let mut missing = Vec::new();
    let mut parent = Opt::Absent;
    let mut next = key.parent();
    while let Opt::Present(ancestor) = next {
      if let Opt::Present(id) = self.get(&ancestor) {
        parent = Opt::Present(id);
        break;
      }
      next = ancestor.parent();
      missing.push(ancestor);
    }
    for ancestor in missing.into_iter().rev() {
      parent = Opt::Present(self.insert(ancestor, parent));
    }
    self.insert(key.clone(), parent)
  }

  fn insert(&mut self, key: NodeKey, parent: Opt<NodeId>) -> NodeId {
    let id = NodeId(self.nodes.len());
    let parent = parent.on_present(|parent| self.nodes[parent.0].children.push(id));
    tracing::trace!(%key, ?id, ?parent, "created node");
    self.ids.insert(key.clone(), id);
    self.nodes.push(Node {
      key,
      parent,
      children: Vec::new(),
      predecessors: Vec::new(),
      successors: Vec::new(),
    });
    id
  }

  /// Adds an edge from `prev` to `next`. Returns `false` if the edge already existed.
  pub fn connect(&mut self, prev: NodeId, next: NodeId) -> bool {
    if self.nodes[prev.0].successors.contains(&next) {
      return false;
    }
    self.nodes[prev.0].successors.push(next);
    self.nodes[next.0].predecessors.push(prev);
    tracing::debug!(prev = %self.nodes[prev.0].key, next = %self.nodes[next.0].key, "connected nodes");
    true
  }

  /// Registers the node `connection` defines and, if it has a previous node, the edge from that node.
  pub fn add_connection(&mut self, connection: &impl ConnectionDef) -> NodeId {
    let id = self.get_or_create(connection.key());
    if let Opt::Present(prev) = connection.prev_node().map(|prev_key| self.get_or_create(prev_key)) {
      self.connect(prev, id);
    }
    id
  }


  /// Number of predecessor steps on the longest path from a node without predecessors to `id`: 0 without
  /// predecessors, otherwise one more than the deepest predecessor.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::Cycle`] if `id` is reachable from itself through predecessors.
  pub fn depth(&self, id: NodeId) -> Result<u32, GraphError> {
    self.fold_post_order(
      id,
      |node| node.predecessors.clone(),
      |depths| depths.iter().map(|depth| depth.saturating_add(1)).max().unwrap_or(0),
    )
  }

  /// Height of the tree of successors following `id` within the same parent: 1 if no successor shares `id`'s
  /// parent, otherwise the sum of those successors' follow-tree heights.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::Cycle`] if `id` is reachable from itself through such successors.
  pub fn follow_tree_height(&self, id: NodeId) -> Result<u32, GraphError> {
    self.fold_post_order(
      id,
      |node| node.successors.iter()
        .copied()
        .filter(|next| self.nodes[next.0].parent == node.parent)
        .collect(),
      |heights| match heights {
        [] => 1,
        _ => heights.iter().fold(0u32, |sum, height| sum.saturating_add(*height)),
      },
    )
  }

  /// Depth-first walk from `start` over `neighbours`, finishing a node with `combine` over its neighbours' results
  /// once all of them are finished. Each node is finished once; later visits reuse its result.
  fn fold_post_order(
    &self,
    start: NodeId,
    neighbours: impl Fn(&Node) -> Vec<NodeId>,
    combine: impl Fn(&[u32]) -> u32,
  ) -> Result<u32, GraphError> {
    let mut visits = vec![Visit::Unvisited; self.nodes.len()];
    visits[start.0] = Visit::InProgress;
    let mut stack = vec![Frame { id: start, neighbours: neighbours(&self.nodes[start.0]), next: 0 }];
    let mut result = 0;
    while let Some(frame) = stack.last_mut() {
      if let Some(&next) = frame.neighbours.get(frame.next) {
        frame.next += 1;
        match visits[next.0] {
          Visit::Done(_) => {}
          Visit::InProgress => {
            let key = &self.nodes[next.0].key;
            tracing::warn!(%key, "detected cycle");
            return Err(GraphError::Cycle(key.clone()));
          }
          Visit::Unvisited => {
            visits[next.0] = Visit::InProgress;
            stack.push(Frame { id: next, neighbours: neighbours(&self.nodes[next.0]), next: 0 });
          }
        }
      } else {
        let results: Vec<u32> = frame.neighbours.iter()
          .filter_map(|neighbour| match visits[neighbour.0] {
            Visit::Done(result) => Some(result),
            _ => None,
          })
          .collect();
        result = combine(&results);
        visits[frame.id.0] = Visit::Done(result);
        stack.pop();
      }
    }
    Ok(result)
  }
}

impl Index<NodeId> for NodeGraph {
  type Output = Node;
  #[inline]
  fn index(&self, id: NodeId) -> &Self::Output { self.node(id) }
}

#[derive(Copy, Clone, Debug)]
enum Visit {
  Unvisited,
  InProgress,
  Done(u32),
}

/// Node on the walk stack, with the index of the next neighbour to visit.
struct Frame {
  id: NodeId,
  neighbours: Vec<NodeId>,
  next: usize,
}


#[cfg(test)]
mod tests {
  use opt_core::app::tracing::AppTracingBuilder;

  use crate::connection::Connection;

  use super::*;

  fn key(s: &str) -> NodeKey { NodeKey::parse(s).unwrap() }

  fn init_tracing() {
    let _ = AppTracingBuilder::default().with_test_writer().try_build();
  }

  #[test]
  fn get_or_create_registers_ancestors() {
    init_tracing();
    let mut graph = NodeGraph::new();
    let c = graph.get_or_create(&key("a:b:c"));
    assert_eq!(graph.len(), 3);

    let b = graph.get(&key("a:b")).require(|| "missing a:b").unwrap();
    let a = graph.get(&key("a")).require(|| "missing a").unwrap();
    assert_eq!(graph[c].parent(), Opt::Present(b));
    assert_eq!(graph[b].parent(), Opt::Present(a));
    assert_eq!(graph[a].parent(), Opt::Absent);
    assert_eq!(graph[a].children(), &[b]);
    assert_eq!(graph[b].children(), &[c]);
    assert_eq!(graph.parent_node(c).map(|node| node.key().as_str()), Opt::Present("a:b"));
    assert_eq!(graph.roots().map(|(id, _)| id).collect::<Vec<_>>(), vec![a]);
  }

  #[test]
  fn get_or_create_returns_existing_node() {
    let mut graph = NodeGraph::new();
    let first = graph.get_or_create(&key("a:b"));
    let second = graph.get_or_create(&key("a:b"));
    assert_eq!(first, second);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph[graph.get(&key("a")).or_else(|| panic!("a is registered"))].children(), &[first]);
  }

  #[test]
  fn lookups_of_unknown_keys_are_absent() {
    let graph = NodeGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.get(&key("x")), Opt::Absent);
    assert!(graph.get_node(&key("x")).is_absent());
    assert!(!graph.contains(&key("x")));
  }

  #[test]
  fn connect_is_idempotent() {
    let mut graph = NodeGraph::new();
    let a = graph.get_or_create(&key("a"));
    let b = graph.get_or_create(&key("b"));
    assert!(graph.connect(a, b));
    assert!(!graph.connect(a, b));
    assert_eq!(graph[a].successors(), &[b]);
    assert_eq!(graph[b].predecessors(), &[a]);
  }

  #[test]
  fn depth_is_longest_predecessor_chain() {
    init_tracing();
    let graph = NodeGraph::from_connections([
      Connection::start(key("f:a")),
      Connection::after(key("f:b"), key("f:a")),
      Connection::after(key("f:c"), key("f:b")),
      Connection::after(key("f:d"), key("f:a")),
      Connection::after(key("f:c"), key("f:d")),
    ]);
    let depth = |s: &str| graph.depth(graph.get(&key(s)).or_else(|| panic!("{s} is registered")));
    assert_eq!(depth("f:a"), Ok(0));
    assert_eq!(depth("f:b"), Ok(1));
    assert_eq!(depth("f:d"), Ok(1));
    assert_eq!(depth("f:c"), Ok(2));
    assert_eq!(depth("f"), Ok(0));
  }

  #[test]
  fn follow_tree_height_sums_family_successors() {
    let graph = NodeGraph::from_connections([
      Connection::start(key("f:a")),
      Connection::after(key("f:b"), key("f:a")),
      Connection::after(key("f:c"), key("f:a")),
      Connection::after(key("f:d"), key("f:c")),
      Connection::after(key("f:e"), key("f:c")),
      // Successor under another parent does not count.
      Connection::after(key("g:x"), key("f:a")),
    ]);
    let height = |s: &str| graph.follow_tree_height(graph.get(&key(s)).or_else(|| panic!("{s} is registered")));
    assert_eq!(height("f:b"), Ok(1));
    assert_eq!(height("f:c"), Ok(2));
    assert_eq!(height("f:a"), Ok(3));
    assert_eq!(height("g:x"), Ok(1));
  }

  #[test]
  fn follow_tree_height_counts_shared_successor_per_path() {
    let graph = NodeGraph::from_connections([
      Connection::start(key("f:a")),
      Connection::after(key("f:b"), key("f:a")),
      Connection::after(key("f:c"), key("f:a")),
      Connection::after(key("f:d"), key("f:b")),
      Connection::after(key("f:d"), key("f:c")),
      Connection::after(key("f:e1"), key("f:d")),
      Connection::after(key("f:e2"), key("f:d")),
    ]);
    let id = |s: &str| graph.get(&key(s)).or_else(|| panic!("{s} is registered"));
    assert_eq!(graph.follow_tree_height(id("f:d")), Ok(2));
    assert_eq!(graph.follow_tree_height(id("f:b")), Ok(2));
    assert_eq!(graph.follow_tree_height(id("f:c")), Ok(2));
    assert_eq!(graph.follow_tree_height(id("f:a")), Ok(4));
    assert_eq!(graph.depth(id("f:d")), Ok(2));
    assert_eq!(graph.depth(id("f:e1")), Ok(3));
  }

  #[test]
  fn walks_long_chains_without_recursion() {
    const LEN: usize = 100_000;
    let keys: Vec<NodeKey> = (0..LEN).map(|i| key(&format!("n{i}"))).collect();
    let graph = NodeGraph::from_connections(
      std::iter::once(Connection::start(keys[0].clone()))
        .chain(keys.windows(2).map(|pair| Connection::after(pair[1].clone(), pair[0].clone())))
    );
    assert_eq!(graph.len(), LEN);
    let first = graph.get(&keys[0]).or_else(|| panic!("first node is registered"));
    let last = graph.get(&keys[LEN - 1]).or_else(|| panic!("last node is registered"));
    assert_eq!(graph.depth(last), Ok(LEN as u32 - 1));
    assert_eq!(graph.depth(first), Ok(0));
    assert_eq!(graph.follow_tree_height(first), Ok(1));
    assert_eq!(graph.follow_tree_height(last), Ok(1));
  }

  #[test]
  fn get_or_create_handles_deep_keys() {
    const LEN: usize = 5_000;
    let mut graph = NodeGraph::new();
    let deep = NodeKey::from_segments((0..LEN).map(|i| format!("s{i}"))).unwrap();
    let id = graph.get_or_create(&deep);
    assert_eq!(graph.len(), LEN);
    assert_eq!(graph.roots().count(), 1);
    let parent = graph.parent_node(id).map(|node| node.key().clone());
    assert_eq!(parent, deep.parent());

    // Only the missing tail is created when an ancestor is already registered.
    let sibling = deep.parent().into_option().unwrap().child("x").unwrap();
    let sibling_id = graph.get_or_create(&sibling);
    assert_eq!(graph.len(), LEN + 1);
    assert_eq!(graph[sibling_id].parent(), graph[id].parent());
  }

  #[test]
  fn add_connection_reuses_nodes_and_edges() {
    let mut graph = NodeGraph::new();
    let connection = Connection::after(key("f:b"), key("f:a"));
    let first = graph.add_connection(&connection);
    let second = graph.add_connection(&connection);
    assert_eq!(first, second);
    assert_eq!(graph.len(), 3);
    let a = graph.get(&key("f:a")).or_else(|| panic!("f:a is registered"));
    assert_eq!(graph[a].successors(), &[first]);
    assert_eq!(graph[first].predecessors(), &[a]);
  }

  #[test]
  fn cycles_are_reported() {
    init_tracing();
    let graph = NodeGraph::from_connections([
      Connection::after(key("a"), key("b")),
      Connection::after(key("b"), key("a")),
    ]);
    let a = graph.get(&key("a")).or_else(|| panic!("a is registered"));
    assert!(matches!(graph.depth(a), Err(GraphError::Cycle(_))));
    assert!(matches!(graph.follow_tree_height(a), Err(GraphError::Cycle(_))));
  }

  #[test]
  fn nodes_iterate_in_creation_order() {
    let mut graph = NodeGraph::new();
    graph.add_connection(&Connection::new(key("x:y"), None::<NodeKey>));
    graph.add_connection(&Connection::new(key("z"), key("x")));
    let keys: Vec<_> = graph.nodes().map(|(_, node)| node.key().to_string()).collect();
    assert_eq!(keys, vec!["x", "x:y", "z"]);
    let x = graph.get(&key("x")).or_else(|| panic!("x is registered"));
    assert_eq!(graph[x].successors().len(), 1);
  }
}
