//! Game state management - the aggregate holding the whole board session.

mod authoring;
mod commands;

pub use authoring::*;
pub use commands::*;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::flags::{resolve_content, DisplayedContent, Flags};
use crate::graph::{Edge, NodeId, NodeKind, TaskGraph, TaskNode};
use crate::grid::{DirectionOrder, GridPosition, ORTHOGONAL};
use crate::navigation::{find_focus_target, Direction};
use crate::progression::{level_for_xp, xp_reward, LevelProgress};

const DEFAULT_START_TITLE: &str = "Journey Begins";
const DEFAULT_START_DESCRIPTION: &str =
    "Your productivity adventure starts here. Complete this task to open up unexplored ground.";

/// Interface language for display text and generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Ja,
}

/// Presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
}

/// Camera offset in lattice units. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
}

impl Camera {
    /// Center the camera on a lattice cell.
    pub fn center_on(&mut self, position: GridPosition) {
        self.x = position.col as f64;
        self.y = position.row as f64;
    }
}

/// Player mode or authoring (GM) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayMode {
    #[default]
    Player,
    Gm,
}

/// Result of a successful pawn move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelOutcome {
    pub from: NodeId,
    pub to: NodeId,
    /// Whether the move used the GM-mode bypass.
    pub authored: bool,
}

/// Result of completing the pawn's node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub node: NodeId,
    pub xp_gained: u32,
    pub level: u32,
    pub leveled_up: bool,
    pub raised_flag: Option<String>,
}

/// Everything needed to rebuild a board from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub nodes: Vec<TaskNode>,
    pub edges: Vec<Edge>,
    pub pawn: NodeId,
    pub focus: NodeId,
    pub xp: u32,
    pub level: u32,
    pub flags: Flags,
}

/// The complete state of a board session.
///
/// Pawn and focus always name existing nodes. Every mutating method either
/// succeeds completely or returns an error with the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    graph: TaskGraph,
    pawn: NodeId,
    focus: NodeId,
    xp: u32,
    level: u32,
    mode: PlayMode,
    flags: Flags,

    pub camera: Camera,
    pub settings: Settings,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a board with the default start node.
    pub fn new() -> Self {
        Self::with_start(DEFAULT_START_TITLE, DEFAULT_START_DESCRIPTION)
    }

    /// Create a board whose start node carries the given text.
    pub fn with_start(title: impl Into<String>, description: impl Into<String>) -> Self {
        let start = TaskNode::new(NodeId::start(), title, description, GridPosition::origin())
            .with_kind(NodeKind::Start);
        Self {
            graph: TaskGraph::from_parts(vec![start], Vec::new()),
            pawn: NodeId::start(),
            focus: NodeId::start(),
            xp: 0,
            level: 1,
            mode: PlayMode::Player,
            flags: Flags::new(),
            camera: Camera::default(),
            settings: Settings::default(),
        }
    }

    /// Rebuild a board from a snapshot, checking every structural invariant.
    pub fn restore(snapshot: Snapshot, settings: Settings, mode: PlayMode) -> Result<Self, RulesError> {
        let graph = TaskGraph::from_parts(snapshot.nodes, snapshot.edges);
        graph.validate()?;
        for (field, id) in [("pawnPosition", &snapshot.pawn), ("focusedNodeId", &snapshot.focus)] {
            if !graph.contains(id) {
                return Err(RulesError::InvalidReference {
                    field,
                    id: id.clone(),
                });
            }
        }

        let mut camera = Camera::default();
        if let Some(pawn) = graph.get(&snapshot.pawn) {
            camera.center_on(pawn.position);
        }

        Ok(Self {
            graph,
            pawn: snapshot.pawn,
            focus: snapshot.focus,
            xp: snapshot.xp,
            level: snapshot.level.max(level_for_xp(snapshot.xp)),
            mode,
            flags: snapshot.flags,
            camera,
            settings,
        })
    }

    /// Capture the persistent part of the board.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.graph.nodes().to_vec(),
            edges: self.graph.edges().to_vec(),
            pawn: self.pawn.clone(),
            focus: self.focus.clone(),
            xp: self.xp,
            level: self.level,
            flags: self.flags.clone(),
        }
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[TaskNode] {
        self.graph.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    /// Get node by ID.
    pub fn node(&self, id: &NodeId) -> Option<&TaskNode> {
        self.graph.get(id)
    }

    /// Id of the node holding the pawn.
    pub fn pawn(&self) -> &NodeId {
        &self.pawn
    }

    /// Id of the focused node.
    pub fn focus(&self) -> &NodeId {
        &self.focus
    }

    pub fn pawn_node(&self) -> Option<&TaskNode> {
        self.graph.get(&self.pawn)
    }

    pub fn focused_node(&self) -> Option<&TaskNode> {
        self.graph.get(&self.focus)
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Progress toward the next level.
    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.xp)
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Check if authoring mode is active.
    pub fn is_gm(&self) -> bool {
        self.mode == PlayMode::Gm
    }

    /// Switch between player and GM mode.
    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    /// Id of the start node.
    pub fn start_id(&self) -> NodeId {
        self.graph
            .nodes()
            .iter()
            .find(|node| node.is_start())
            .map(|node| node.id.clone())
            .unwrap_or_else(NodeId::start)
    }

    /// Content a node currently displays under the active flags.
    pub fn displayed<'a>(&'a self, node: &'a TaskNode) -> DisplayedContent<'a> {
        resolve_content(node, &self.flags)
    }

    /// Focus a node directly, as a click does.
    pub fn focus_node(&mut self, id: &NodeId) -> Result<(), RulesError> {
        if !self.graph.contains(id) {
            return Err(RulesError::not_found(id.clone()));
        }
        self.focus = id.clone();
        Ok(())
    }

    /// Move focus to the nearest node in an arrow direction.
    ///
    /// Returns false when no node lies in that direction. Locked nodes can be
    /// focused; only entering them is refused.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        let Some(current) = self.focused_node() else {
            return false;
        };
        let Some(target) = find_focus_target(self.graph.nodes(), current, direction) else {
            return false;
        };
        let next = target.id.clone();
        self.focus = next;
        true
    }

    /// Check whether the pawn may move onto `target`.
    ///
    /// In GM mode neither adjacency nor flags are checked, so authors can
    /// jump anywhere while testing content.
    pub fn can_travel_to(&self, target: &NodeId) -> Result<(), RulesError> {
        let node = self
            .graph
            .get(target)
            .ok_or_else(|| RulesError::not_found(target.clone()))?;
        if *target == self.pawn {
            return Err(RulesError::AlreadyAtTarget(target.clone()));
        }
        if self.is_gm() {
            return Ok(());
        }
        if !self.graph.is_adjacent(&self.pawn, target) {
            return Err(RulesError::NotAdjacent {
                from: self.pawn.clone(),
                to: target.clone(),
            });
        }
        if let Some(flag) = &node.required_flag {
            if !self.flags.is_raised(flag) {
                return Err(RulesError::Locked {
                    node: target.clone(),
                    flag: flag.clone(),
                });
            }
        }
        Ok(())
    }

    /// Move the pawn onto the focused node.
    pub fn travel(&mut self) -> Result<TravelOutcome, RulesError> {
        let target = self.focus.clone();
        self.can_travel_to(&target)?;

        let from = std::mem::replace(&mut self.pawn, target.clone());
        if let Some(node) = self.graph.get(&target) {
            self.camera.center_on(node.position);
        }
        tracing::debug!(from = %from, to = %target, "Pawn moved");

        Ok(TravelOutcome {
            from,
            to: target,
            authored: self.is_gm(),
        })
    }

    /// Complete the node under the pawn.
    ///
    /// Returns `None` if it was already completed. Otherwise grants XP,
    /// recomputes the level and raises the node's completion flag, all in
    /// one step.
    pub fn complete_current(&mut self) -> Option<Completion> {
        let node = self.graph.get(&self.pawn)?;
        if node.is_completed() {
            return None;
        }

        let raised_flag = node
            .on_complete_flag
            .as_deref()
            .and_then(|flag| crate::flags::validate_flag_name(flag).ok())
            .map(str::to_string);
        let xp_gained = xp_reward(node.difficulty);
        let id = node.id.clone();

        self.graph.update(&id, |n| n.status = crate::graph::NodeStatus::Completed);
        if let Some(flag) = &raised_flag {
            // Name already validated above.
            let _ = self.flags.raise(flag);
        }

        let previous_level = self.level;
        self.xp = self.xp.saturating_add(xp_gained);
        self.level = self.level.max(level_for_xp(self.xp));
        tracing::debug!(node_id = %id, xp_gained, level = self.level, "Task completed");

        Some(Completion {
            node: id,
            xp_gained,
            level: self.level,
            leveled_up: self.level > previous_level,
            raised_flag,
        })
    }

    /// Add generated follow-up tasks around `origin` (scouting and breakdown).
    ///
    /// Fails with `NoViablePaths` and leaves the board untouched if drafts
    /// were offered but none found a free neighbour. An empty draft list adds
    /// nothing and succeeds.
    pub fn spawn_followups(
        &mut self,
        origin: &NodeId,
        drafts: Vec<TaskDraft>,
        order: &dyn DirectionOrder,
    ) -> Result<Vec<NodeId>, RulesError> {
        let origin_node = self
            .graph
            .get(origin)
            .ok_or_else(|| RulesError::not_found(origin.clone()))?;
        let mut occupied = self.graph.occupied();

        let placed = crate::grid::place_batch(
            origin_node.position,
            &mut occupied,
            drafts,
            &ORTHOGONAL,
            order,
        )
        .ok_or_else(|| RulesError::NoViablePaths(origin.clone()))?;

        let (nodes, edges) = build_spawned(origin, placed.into_iter().map(|p| (p.payload, p.position)));
        let ids = nodes.iter().map(|n| n.id.clone()).collect();
        self.graph.insert(nodes, edges)?;
        Ok(ids)
    }
}

/// Turn placed drafts into nodes, each joined to `origin` by an edge.
fn build_spawned(
    origin: &NodeId,
    placed: impl IntoIterator<Item = (TaskDraft, GridPosition)>,
) -> (Vec<TaskNode>, Vec<Edge>) {
    placed
        .into_iter()
        .map(|(draft, position)| {
            let node = draft.into_node(position).with_generated_from(origin.clone());
            let edge = Edge::new(origin.clone(), node.id.clone());
            (node, edge)
        })
        .unzip()
}
