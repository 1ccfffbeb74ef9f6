//! Hierarchical node keys and a node graph tracking parent/child and predecessor/successor edges.

pub mod key;
pub mod connection;
pub mod graph;
pub mod error;

pub use connection::{Connection, ConnectionDef};
pub use error::GraphError;
pub use graph::{Node, NodeGraph, NodeId};
pub use key::NodeKey;
