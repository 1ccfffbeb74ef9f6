use thiserror::Error;

use crate::key::NodeKey;

#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum GraphError {
  #[error(transparent)]
  InvalidArgument(#[from] opt_core::Error),
  #[error("Node '{0}' is part of a cycle")]
  Cycle(NodeKey),
}
