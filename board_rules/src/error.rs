//! Error types for board rule violations.

use thiserror::Error;

use crate::graph::NodeId;
use crate::grid::GridPosition;

/// Errors raised when a board operation is refused.
///
/// Every variant describes a refused transition: the state the operation was
/// applied to is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// No node with the given id exists.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The pawn already stands on the focused node.
    #[error("Pawn is already on node {0}")]
    AlreadyAtTarget(NodeId),

    /// The target node is not connected to the pawn's node.
    #[error("Node {to} is not adjacent to {from}")]
    NotAdjacent { from: NodeId, to: NodeId },

    /// The target node requires a flag that is not raised.
    #[error("Node {node} is locked behind flag '{flag}'")]
    Locked { node: NodeId, flag: String },

    /// No free lattice cell was found around the origin.
    #[error("No viable paths around node {0}")]
    NoViablePaths(NodeId),

    /// Flag names must contain at least one non-whitespace character.
    #[error("Invalid flag name: {0:?}")]
    InvalidFlagName(String),

    /// The operation is only available in GM mode.
    #[error("Operation requires GM mode: {0}")]
    RequiresGmMode(&'static str),

    /// The start node cannot be deleted.
    #[error("The start node {0} cannot be removed")]
    StartNodeProtected(NodeId),

    /// An edge references a node that does not exist.
    #[error("Edge {from} -> {to} references a missing node")]
    DanglingEdge { from: NodeId, to: NodeId },

    /// Two nodes share the same lattice cell.
    #[error("Position {position} is occupied by both {first} and {second}")]
    DuplicatePosition {
        position: GridPosition,
        first: NodeId,
        second: NodeId,
    },

    /// Two nodes share the same id.
    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    /// The graph has no start node, or more than one.
    #[error("Expected exactly one start node, found {0}")]
    StartNodeCount(usize),

    /// A state field points at a node that does not exist.
    #[error("{field} references missing node {id}")]
    InvalidReference { field: &'static str, id: NodeId },
}

impl RulesError {
    /// Create a not found error.
    pub fn not_found(id: impl Into<NodeId>) -> Self {
        Self::NodeNotFound(id.into())
    }

    /// Create a GM-mode-required error for the named operation.
    pub fn gm_only(operation: &'static str) -> Self {
        Self::RequiresGmMode(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RulesError::Locked {
            node: NodeId::from("gate"),
            flag: "KEY".to_string(),
        };
        assert_eq!(err.to_string(), "Node gate is locked behind flag 'KEY'");

        let err = RulesError::not_found("missing");
        assert_eq!(err.to_string(), "Node not found: missing");
    }
}
