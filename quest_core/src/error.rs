//! Error types for the session layer.

use board_rules::RulesError;
use thiserror::Error;

/// Errors from the text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid generation response: {0}")]
    InvalidResponse(String),
}

/// Errors from saving or loading board documents.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document violates board invariants: {0}")]
    Invalid(#[from] RulesError),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing stored under key '{0}'")]
    Missing(String),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Unified error for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A generation request is already outstanding.
    #[error("A generation request is already in progress")]
    Busy,

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
