//! GM-mode authoring: hand-placed tiles, node edits, deletion and flags.

use super::GameState;
use crate::error::RulesError;
use crate::flags::normalize_flag_field;
use crate::graph::{Edge, NodeId, NodeKind, NodeStatus, TaskNode};
use crate::grid::{place_campaign, place_each, GridPosition, IdentityOrder, ALL_EIGHT, ORTHOGONAL};

/// Content for a tile that has not been placed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub difficulty: i32,
}

impl TaskDraft {
    /// Create a new draft.
    pub fn new(title: impl Into<String>, description: impl Into<String>, difficulty: i32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            difficulty,
        }
    }

    /// Materialise the draft as an available task node at `position`.
    pub fn into_node(self, position: GridPosition) -> TaskNode {
        TaskNode::new(NodeId::generate(), self.title, self.description, position)
            .with_difficulty(self.difficulty)
    }
}

/// Field changes applied by the GM node editor.
///
/// `None` leaves a field alone. For the flag fields, a blank string clears
/// the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<i32>,
    pub kind: Option<NodeKind>,
    pub status: Option<NodeStatus>,
    pub required_flag: Option<String>,
    pub on_complete_flag: Option<String>,
    pub condition_flag: Option<String>,
    pub condition_title: Option<String>,
    pub condition_desc: Option<String>,
}

impl NodeEdit {
    fn apply_to(self, node: &mut TaskNode) {
        if let Some(title) = self.title {
            node.title = title;
        }
        if let Some(description) = self.description {
            node.description = description;
        }
        if let Some(difficulty) = self.difficulty {
            node.difficulty = difficulty;
        }
        if let Some(kind) = self.kind {
            node.kind = kind;
        }
        if let Some(status) = self.status {
            node.status = status;
        }
        if let Some(flag) = self.required_flag {
            node.required_flag = normalize_flag_field(Some(flag));
        }
        if let Some(flag) = self.on_complete_flag {
            node.on_complete_flag = normalize_flag_field(Some(flag));
        }
        if let Some(flag) = self.condition_flag {
            node.condition_flag = normalize_flag_field(Some(flag));
        }
        if let Some(title) = self.condition_title {
            node.condition_title = Some(title).filter(|t| !t.is_empty());
        }
        if let Some(desc) = self.condition_desc {
            node.condition_desc = Some(desc).filter(|d| !d.is_empty());
        }
    }
}

impl GameState {
    fn require_gm(&self, operation: &'static str) -> Result<(), RulesError> {
        if self.is_gm() {
            Ok(())
        } else {
            Err(RulesError::gm_only(operation))
        }
    }

    /// Place a single new task next to the focused node.
    fn place_next_to_focus(
        &mut self,
        draft: TaskDraft,
        directions: &[crate::grid::Offset],
    ) -> Result<NodeId, RulesError> {
        let origin = self.focus.clone();
        let origin_pos = self
            .graph
            .get(&origin)
            .map(|n| n.position)
            .ok_or_else(|| RulesError::not_found(origin.clone()))?;
        let mut occupied = self.graph.occupied();

        let report = place_each(origin_pos, &mut occupied, [draft], directions, &IdentityOrder);
        let placement = report
            .placed
            .into_iter()
            .next()
            .ok_or_else(|| RulesError::NoViablePaths(origin.clone()))?;

        let node = placement
            .payload
            .into_node(placement.position)
            .with_generated_from(origin.clone());
        let id = node.id.clone();
        self.graph
            .insert(vec![node], vec![Edge::new(origin, id.clone())])?;
        Ok(id)
    }

    /// Add a hand-written task in a free orthogonal neighbour of the focused node.
    pub fn add_manual_task(&mut self, draft: TaskDraft) -> Result<NodeId, RulesError> {
        self.require_gm("add task")?;
        self.place_next_to_focus(draft, &ORTHOGONAL)
    }

    /// Add a branch task next to the focused node, diagonals included.
    pub fn create_branch(&mut self, draft: TaskDraft) -> Result<NodeId, RulesError> {
        self.require_gm("create branch")?;
        self.place_next_to_focus(draft, &ALL_EIGHT)
    }

    /// Surround `origin` with up to `count` blank tiles.
    ///
    /// Blanks that find no free orthogonal neighbour are silently dropped.
    pub fn insert_blank_nodes(
        &mut self,
        origin: &NodeId,
        count: usize,
    ) -> Result<Vec<NodeId>, RulesError> {
        self.require_gm("insert blank tiles")?;
        let origin_pos = self
            .graph
            .get(origin)
            .map(|n| n.position)
            .ok_or_else(|| RulesError::not_found(origin.clone()))?;
        let mut occupied = self.graph.occupied();

        let report = place_each(origin_pos, &mut occupied, 0..count, &ORTHOGONAL, &IdentityOrder);
        let (nodes, edges): (Vec<_>, Vec<_>) = report
            .placed
            .into_iter()
            .map(|p| {
                let node = TaskNode::blank(NodeId::generate(), p.position)
                    .with_generated_from(origin.clone());
                let edge = Edge::new(origin.clone(), node.id.clone());
                (node, edge)
            })
            .unzip();

        let ids = nodes.iter().map(|n| n.id.clone()).collect();
        self.graph.insert(nodes, edges)?;
        Ok(ids)
    }

    /// Break the focused node down into generated sub-tasks.
    pub fn spawn_breakdown(
        &mut self,
        drafts: Vec<TaskDraft>,
        order: &dyn crate::grid::DirectionOrder,
    ) -> Result<Vec<NodeId>, RulesError> {
        self.require_gm("break down task")?;
        let origin = self.focus.clone();
        self.spawn_followups(&origin, drafts, order)
    }

    /// Lay a campaign chain out from `origin`. The last placed node becomes
    /// the boss.
    ///
    /// Each node is joined to the one before it. Drafts that cannot be
    /// placed are skipped; an empty draft list adds nothing. Like
    /// [`GameState::spawn_followups`] this applies a generation result and is
    /// not gated on the mode; the request for it is.
    pub fn spawn_campaign(
        &mut self,
        origin: &NodeId,
        drafts: Vec<TaskDraft>,
    ) -> Result<Vec<NodeId>, RulesError> {
        let origin_pos = self
            .graph
            .get(origin)
            .map(|n| n.position)
            .ok_or_else(|| RulesError::not_found(origin.clone()))?;
        let mut occupied = self.graph.occupied();

        let report = place_campaign(origin_pos, &mut occupied, drafts);
        if report.placed.is_empty() && report.skipped > 0 {
            return Err(RulesError::NoViablePaths(origin.clone()));
        }

        let mut nodes: Vec<TaskNode> = Vec::with_capacity(report.placed.len());
        let mut edges = Vec::with_capacity(report.placed.len());
        let mut previous = origin.clone();
        for placement in report.placed {
            let node = placement
                .payload
                .into_node(placement.position)
                .with_generated_from(origin.clone());
            edges.push(Edge::new(previous, node.id.clone()));
            previous = node.id.clone();
            nodes.push(node);
        }
        if let Some(last) = nodes.last_mut() {
            last.kind = NodeKind::Boss;
        }

        let ids = nodes.iter().map(|n| n.id.clone()).collect();
        self.graph.insert(nodes, edges)?;
        Ok(ids)
    }

    /// Edit a node's fields.
    ///
    /// Returns `Ok(false)` without changing anything if the id is absent.
    /// Edits that would add or remove the start kind are refused.
    pub fn edit_node(&mut self, id: &NodeId, edit: NodeEdit) -> Result<bool, RulesError> {
        self.require_gm("edit node")?;
        let Some(node) = self.graph.get(id) else {
            return Ok(false);
        };
        if let Some(kind) = edit.kind {
            if (kind == NodeKind::Start) != node.is_start() {
                return Err(RulesError::StartNodeProtected(self.start_id()));
            }
        }
        Ok(self.graph.update(id, |node| edit.apply_to(node)))
    }

    /// Delete a node and every edge touching it.
    ///
    /// Focus and pawn fall back to the start node if they pointed at the
    /// deleted node.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<TaskNode, RulesError> {
        self.require_gm("delete node")?;
        let start = self.start_id();
        if *id == start {
            return Err(RulesError::StartNodeProtected(start));
        }
        let removed = self
            .graph
            .remove(id)
            .ok_or_else(|| RulesError::not_found(id.clone()))?;

        if self.focus == *id {
            self.focus = start.clone();
        }
        if self.pawn == *id {
            self.pawn = start;
        }
        tracing::debug!(node_id = %id, "Node deleted");
        Ok(removed)
    }

    /// Set a flag explicitly.
    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<(), RulesError> {
        self.require_gm("set flag")?;
        self.flags.set(name, value)
    }

    /// Remove a flag. Returns its previous value.
    pub fn clear_flag(&mut self, name: &str) -> Result<Option<bool>, RulesError> {
        self.require_gm("clear flag")?;
        Ok(self.flags.clear(name))
    }
}
