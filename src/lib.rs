//! Safe Box Challenge - a grid of boxes, one bomb, a couple of surprises
//!
//! Core modules:
//! - `sim`: Deterministic round engine (generation, click resolution, levels)
//! - `highscores`: Top-5 leaderboard with pluggable persistence
//! - `persistence`: Key-value storage backends
//! - `platform`: Browser/native platform abstraction
//! - `session`: Coordinator wiring rounds, levels, leaderboard and events
//! - `audio`: Sound cue routing for the presentation layer
//! - `web`: Browser bindings (wasm32 only)

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{GameError, Result, StorageError};
pub use highscores::{Leaderboard, LeaderboardEntry, LeaderboardStore};
pub use session::Session;
pub use settings::{Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Points for revealing a plain safe box
    pub const SAFE_POINTS: u64 = 5;
    /// Points for revealing a surprise box
    pub const BONUS_POINTS: u64 = 10;
    /// Number of surprise candidates drawn per round (before filtering)
    pub const BONUS_CANDIDATES: usize = 2;

    /// First level of a run
    pub const FIRST_LEVEL: u32 = 1;
    /// Grid side length is `level + GRID_SIZE_OFFSET`
    pub const GRID_SIZE_OFFSET: u32 = 2;
    /// Highest level that still offers "Next Level" (UI policy default)
    pub const DEFAULT_MAX_LEVEL: u32 = 3;

    /// Maximum number of leaderboard entries to keep
    pub const MAX_HIGH_SCORES: usize = 5;
}
