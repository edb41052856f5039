//! Session configuration loaded from TOML.

use std::path::{Path, PathBuf};

use board_rules::{DirectionOrder, GameState, IdentityOrder, Language, ShuffledOrder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::messages::{JA_START_DESCRIPTION, JA_START_TITLE};

pub const DEFAULT_SAVE_KEY: &str = "taskquest-save";
pub const DEFAULT_CAMPAIGN_KEY: &str = "taskquest-campaign";

/// Settings for a [`crate::Session`]. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuestConfig {
    /// Initial interface and generation language.
    pub language: Language,

    /// Randomise the direction order used when placing scouted tasks.
    pub shuffle_directions: bool,

    /// Storage key for progress saves.
    pub save_key: String,

    /// Storage key for campaign exports.
    pub campaign_key: String,

    /// Directory for the file-backed store.
    pub save_dir: Option<PathBuf>,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            language: Language::Ja,
            shuffle_directions: true,
            save_key: DEFAULT_SAVE_KEY.to_string(),
            campaign_key: DEFAULT_CAMPAIGN_KEY.to_string(),
            save_dir: None,
        }
    }
}

impl QuestConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Ordering strategy for follow-up placement.
    pub fn direction_order(&self) -> Box<dyn DirectionOrder + Send + Sync> {
        if self.shuffle_directions {
            Box::new(ShuffledOrder)
        } else {
            Box::new(IdentityOrder)
        }
    }

    /// A fresh board whose start node speaks the configured language.
    pub fn new_game(&self) -> GameState {
        let mut state = match self.language {
            Language::Ja => GameState::with_start(JA_START_TITLE, JA_START_DESCRIPTION),
            Language::En => GameState::new(),
        };
        state.settings.language = self.language;
        state
    }
}
