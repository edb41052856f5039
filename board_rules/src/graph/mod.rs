//! The task graph: tiles, the edges between them, and the store holding both.

mod node;
mod store;

pub use node::*;
pub use store::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the start node every board is seeded with.
pub const START_NODE_ID: &str = "root-node";

/// Unique identifier for task nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a fresh random node id.
    pub fn generate() -> Self {
        Self(format!("node-{}", Uuid::new_v4()))
    }

    /// The fixed id of the start node.
    pub fn start() -> Self {
        Self(START_NODE_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An undirected connection between two lattice neighbours.
///
/// Source and target only record which side spawned the other; adjacency
/// queries treat both orders the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    /// Create a new edge.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Check if the edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }

    /// Check if `id` is either endpoint.
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}
