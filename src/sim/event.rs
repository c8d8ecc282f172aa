//! Named event points for the presentation layer
//!
//! The engine never plays sounds or animations itself. It queues these and
//! the UI decides what to do with them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The bomb was revealed; `score` is the final round score
    HazardHit { score: u64 },
    SafeReveal { points: u64 },
    BonusReveal { points: u64 },
    /// Every safe box was revealed
    RoundWon { score: u64 },
    /// A new, larger grid started
    LevelAdvance { level: u32 },
    /// Run restarted from the given level
    RoundReset { level: u32 },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::HazardHit { .. } => "hazard-hit",
            GameEvent::SafeReveal { .. } => "safe-reveal",
            GameEvent::BonusReveal { .. } => "bonus-reveal",
            GameEvent::RoundWon { .. } => "round-won",
            GameEvent::LevelAdvance { .. } => "level-advance",
            GameEvent::RoundReset { .. } => "round-reset",
        }
    }
}
