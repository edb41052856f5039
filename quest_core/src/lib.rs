//! # Quest Core
//!
//! The session layer of TaskQuest. This crate drives a `board_rules` board
//! from player input, asks a text-generation service for new tasks and flavor
//! lines, and saves or loads boards.
//!
//! ## Core Components
//!
//! - **session**: The `Session` driver, keyboard handling and the busy-flag
//!   gated generation flows
//! - **generation**: The `TaskGenerator` port, prompts and reply parsing
//! - **messages**: Localised status line and rank titles
//! - **persistence**: Progress and campaign documents, storage backends
//! - **config**: TOML configuration
//!
//! ## Design Philosophy
//!
//! - **Rules stay pure**: Every board change goes through `board_rules`; this
//!   crate only decides when to ask and what to show
//! - **Degrade, never abort**: A failed generation or load leaves the board
//!   as it was and explains itself on the status line

pub mod config;
pub mod error;
pub mod generation;
pub mod messages;
pub mod persistence;
pub mod session;

pub use config::*;
pub use error::*;
pub use generation::*;
pub use messages::*;
pub use persistence::*;
pub use session::*;
