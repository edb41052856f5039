//! # Board Rules
//!
//! The rules crate for TaskQuest - tasks laid out as tiles on an infinite
//! grid, a pawn travelling between connected tiles, and completion driving a
//! leveling curve. This crate is the single source of truth for board state
//! and does not perform any I/O or text generation.
//!
//! ## Core Components
//!
//! - **grid**: Lattice positions and the placement engine for new tiles
//! - **graph**: Task nodes, edges and the graph store
//! - **navigation**: Directional focus movement
//! - **progression** / **flags**: Experience, levels and boolean flags
//! - **state**: The `GameState` aggregate, GM authoring and the command reducer

pub mod error;
pub mod flags;
pub mod graph;
pub mod grid;
pub mod navigation;
pub mod progression;
pub mod state;

pub use error::*;
pub use flags::*;
pub use graph::*;
pub use grid::*;
pub use navigation::*;
pub use progression::*;
pub use state::*;
