//! Deterministic round engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected randomness only (seeded or scripted)
//! - Ordered collections for reproducible state
//! - No rendering, audio or storage dependencies

pub mod click;
pub mod event;
pub mod generator;
pub mod level;
pub mod state;

pub use click::{Effect, EffectKind, resolve_click};
pub use event::GameEvent;
pub use generator::{IndexSource, RngState, SeededIndices, generate};
pub use level::{LevelContext, LevelController, advance, grid_size_for_level, reset_to_level1};
pub use state::{CellView, RoundConfig, RoundState, RoundStatus};
