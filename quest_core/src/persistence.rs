//! Save documents and the storage they are written to.
//!
//! Two JSON layouts exist. A progress save carries the whole board including
//! the pawn, focus and experience. A campaign export carries only the authored
//! content (nodes, edges, flags) and always restarts the player at the start
//! node when imported.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use board_rules::{Edge, Flags, GameState, NodeId, NodeStatus, Snapshot, TaskNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PersistError;

/// A full player-progress save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    pub nodes: Vec<TaskNode>,
    pub edges: Vec<Edge>,
    pub pawn_position: NodeId,
    pub focused_node_id: NodeId,
    pub xp: u32,
    pub level: u32,
    #[serde(default)]
    pub flags: Flags,
}

impl From<&GameState> for ProgressDocument {
    fn from(state: &GameState) -> Self {
        let snapshot = state.snapshot();
        Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
            pawn_position: snapshot.pawn,
            focused_node_id: snapshot.focus,
            xp: snapshot.xp,
            level: snapshot.level,
            flags: snapshot.flags,
        }
    }
}

/// An authored campaign without any player position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDocument {
    pub nodes: Vec<TaskNode>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub flags: Flags,
}

/// Serialise the board as a progress save.
pub fn save_progress(state: &GameState) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&ProgressDocument::from(state))?)
}

/// Rebuild a board from a progress save.
///
/// Nothing is returned unless the document parses and passes every graph
/// check. Settings, mode and camera handling come from `current`.
pub fn load_progress(text: &str, current: &GameState) -> Result<GameState, PersistError> {
    let doc: ProgressDocument = serde_json::from_str(text)?;
    let snapshot = Snapshot {
        nodes: doc.nodes,
        edges: doc.edges,
        pawn: doc.pawn_position,
        focus: doc.focused_node_id,
        xp: doc.xp,
        level: doc.level,
        flags: doc.flags,
    };
    let state = GameState::restore(snapshot, current.settings, current.mode())?;
    debug!(nodes = state.nodes().len(), xp = state.xp(), "Progress document restored");
    Ok(state)
}

/// Serialise the authored content of the board.
pub fn export_campaign(state: &GameState) -> Result<String, PersistError> {
    let doc = CampaignDocument {
        nodes: state.nodes().to_vec(),
        edges: state.edges().to_vec(),
        flags: state.flags().clone(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Replace the board content with a campaign.
///
/// Pawn and focus go back to the start node and tiles completed while the
/// author played through are available again. Locked tiles stay locked.
/// Experience and level are kept from `current`.
pub fn import_campaign(text: &str, current: &GameState) -> Result<GameState, PersistError> {
    let doc: CampaignDocument = serde_json::from_str(text)?;
    let nodes = doc
        .nodes
        .into_iter()
        .map(|mut node| {
            if node.status == NodeStatus::Completed {
                node.status = NodeStatus::Available;
            }
            node
        })
        .collect();
    let snapshot = Snapshot {
        nodes,
        edges: doc.edges,
        pawn: NodeId::start(),
        focus: NodeId::start(),
        xp: current.xp(),
        level: current.level(),
        flags: doc.flags,
    };
    let state = GameState::restore(snapshot, current.settings, current.mode())?;
    debug!(nodes = state.nodes().len(), "Campaign document imported");
    Ok(state)
}

/// Key-value storage for save documents.
pub trait SaveStore: Send {
    /// Read the document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;

    fn write(&mut self, key: &str, contents: &str) -> Result<(), PersistError>;
}

/// In-memory store, for tests and embedders without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SaveStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), contents)?;
        Ok(())
    }
}
