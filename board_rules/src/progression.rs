//! Experience and levels.

use serde::{Deserialize, Serialize};

/// Experience needed per level.
pub const XP_PER_LEVEL: u32 = 100;

/// Experience granted per point of difficulty.
pub const XP_PER_DIFFICULTY: u32 = 20;

/// Difficulty range used for XP math.
pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

/// Experience granted for completing a node of the given difficulty.
///
/// Difficulty comes from untrusted generated text, so it is clamped into
/// 1..=5 here rather than validated upstream.
pub fn xp_reward(difficulty: i32) -> u32 {
    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY) as u32 * XP_PER_DIFFICULTY
}

/// Level reached with `xp` total experience. Levels start at 1.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Snapshot of progress toward the next level, for the XP bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub xp: u32,
    pub level: u32,
    /// Experience earned since the current level began.
    pub into_level: u32,
    /// Fraction of the current level completed, in 0.0..1.0.
    pub fraction: f32,
}

impl LevelProgress {
    /// Compute progress for a total experience value.
    pub fn from_xp(xp: u32) -> Self {
        let into_level = xp % XP_PER_LEVEL;
        Self {
            xp,
            level: level_for_xp(xp),
            into_level,
            fraction: into_level as f32 / XP_PER_LEVEL as f32,
        }
    }
}
