//! Task tiles.

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::grid::GridPosition;

/// Lifecycle of a task tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Locked,
    #[default]
    Available,
    Completed,
}

/// Kind of tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The single entry tile where the pawn begins.
    Start,
    #[default]
    Task,
    /// Final tile of a campaign.
    Boss,
    /// Spacer tile without task content.
    Blank,
}

/// A task represented as a tile on the lattice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    pub id: NodeId,
    pub title: String,
    pub description: String,
    pub status: NodeStatus,
    pub position: GridPosition,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Nominally 1-5; clamped when converted to XP.
    pub difficulty: i32,

    /// Node this one was spawned from. Provenance only, not an edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_from: Option<NodeId>,

    /// Flag that must be raised before the pawn may enter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_flag: Option<String>,

    /// Flag raised when this node is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_complete_flag: Option<String>,

    // Conditional content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_desc: Option<String>,
}

impl TaskNode {
    /// Create an available task node with difficulty 1.
    pub fn new(
        id: impl Into<NodeId>,
        title: impl Into<String>,
        description: impl Into<String>,
        position: GridPosition,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: NodeStatus::Available,
            position,
            kind: NodeKind::Task,
            difficulty: 1,
            generated_from: None,
            required_flag: None,
            on_complete_flag: None,
            condition_flag: None,
            condition_title: None,
            condition_desc: None,
        }
    }

    /// Create a blank spacer tile.
    pub fn blank(id: impl Into<NodeId>, position: GridPosition) -> Self {
        Self::new(id, "", "", position).with_kind(NodeKind::Blank)
    }

    /// Set the node kind.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Record the node this one was spawned from.
    pub fn with_generated_from(mut self, parent: NodeId) -> Self {
        self.generated_from = Some(parent);
        self
    }

    /// Require a flag before the pawn may enter.
    pub fn with_required_flag(mut self, flag: impl Into<String>) -> Self {
        self.required_flag = Some(flag.into());
        self
    }

    /// Raise a flag on completion.
    pub fn with_on_complete_flag(mut self, flag: impl Into<String>) -> Self {
        self.on_complete_flag = Some(flag.into());
        self
    }

    /// Show alternative content while `flag` is raised.
    pub fn with_condition(
        mut self,
        flag: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.condition_flag = Some(flag.into());
        self.condition_title = Some(title.into());
        self.condition_desc = Some(description.into());
        self
    }

    /// Check if the node has been completed.
    pub fn is_completed(&self) -> bool {
        self.status == NodeStatus::Completed
    }

    /// Check if this is the start node.
    pub fn is_start(&self) -> bool {
        self.kind == NodeKind::Start
    }
}
