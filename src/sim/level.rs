//! Level progression
//!
//! Grid side grows with the level (`level + 2`). There is no upper bound here;
//! capping "Next Level" is a UI policy (see `Settings::max_level`).

use serde::{Deserialize, Serialize};

use super::generator::{IndexSource, generate};
use super::state::RoundState;
use crate::consts::{FIRST_LEVEL, GRID_SIZE_OFFSET};
use crate::error::{GameError, Result};

/// Current level of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelContext {
    level: u32,
}

impl Default for LevelContext {
    fn default() -> Self {
        Self { level: FIRST_LEVEL }
    }
}

impl LevelContext {
    pub fn new(level: u32) -> Result<Self> {
        if level < FIRST_LEVEL {
            return Err(GameError::InvalidLevel);
        }
        Ok(Self { level })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn grid_size(&self) -> u32 {
        grid_size_for_level(self.level)
    }
}

/// Grid side length for a level
pub fn grid_size_for_level(level: u32) -> u32 {
    level.saturating_add(GRID_SIZE_OFFSET)
}

/// Level after a win
pub fn advance(level: u32) -> u32 {
    level.saturating_add(1)
}

/// Level after a loss or replay
pub fn reset_to_level1() -> u32 {
    FIRST_LEVEL
}

/// Starts rounds for a level using an owned index source
#[derive(Debug, Clone)]
pub struct LevelController<R> {
    context: LevelContext,
    rng: R,
}

impl<R: IndexSource> LevelController<R> {
    pub fn new(rng: R) -> Self {
        Self {
            context: LevelContext::default(),
            rng,
        }
    }

    pub fn context(&self) -> LevelContext {
        self.context
    }

    pub fn level(&self) -> u32 {
        self.context.level
    }

    /// Generate a fresh round for `level` and make it the current level
    pub fn start_level(&mut self, level: u32) -> Result<RoundState> {
        let context = LevelContext::new(level)?;
        let config = generate(context.grid_size(), &mut self.rng)?;
        self.context = context;
        log::info!(
            "Level {} started ({}x{} grid)",
            level,
            config.grid_size(),
            config.grid_size()
        );
        Ok(RoundState::new(config))
    }

    /// Move to the next level and start it
    pub fn advance(&mut self) -> Result<RoundState> {
        self.start_level(advance(self.context.level))
    }

    /// Back to level 1 with a fresh round
    pub fn reset_to_level1(&mut self) -> Result<RoundState> {
        self.start_level(reset_to_level1())
    }
}
