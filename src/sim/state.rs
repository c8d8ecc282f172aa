//! Round configuration and per-round state
//!
//! A `RoundState` is owned by the active round and replaced wholesale when a
//! new round starts. Only the click resolver mutates it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Terminal status of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Boxes can still be clicked
    #[default]
    InProgress,
    /// Every box except the bomb was revealed
    Won,
    /// The bomb was revealed
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        self != RoundStatus::InProgress
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::InProgress => "in_progress",
            RoundStatus::Won => "won",
            RoundStatus::Lost => "lost",
        }
    }
}

/// Layout of one round: grid size, bomb position and surprise positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoundConfig")]
pub struct RoundConfig {
    grid_size: u32,
    total_cells: usize,
    hazard_index: usize,
    bonus_indices: BTreeSet<usize>,
}

impl RoundConfig {
    /// Build a config from explicit positions.
    ///
    /// Bonus positions equal to the hazard are dropped and duplicates
    /// collapse, the same filtering the generator applies to its picks.
    pub fn new(
        grid_size: u32,
        hazard_index: usize,
        bonus_indices: impl IntoIterator<Item = usize>,
    ) -> Result<Self> {
        let total_cells = total_cells(grid_size)?;
        check_index(hazard_index, total_cells)?;

        let mut bonuses = BTreeSet::new();
        for index in bonus_indices {
            check_index(index, total_cells)?;
            if index != hazard_index {
                bonuses.insert(index);
            }
        }

        Ok(Self {
            grid_size,
            total_cells,
            hazard_index,
            bonus_indices: bonuses,
        })
    }

    /// Side length of the square grid
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Number of boxes (`grid_size²`)
    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    pub fn hazard_index(&self) -> usize {
        self.hazard_index
    }

    pub fn bonus_indices(&self) -> &BTreeSet<usize> {
        &self.bonus_indices
    }

    pub fn is_hazard(&self, index: usize) -> bool {
        index == self.hazard_index
    }

    pub fn is_bonus(&self, index: usize) -> bool {
        self.bonus_indices.contains(&index)
    }

    /// Safe boxes that must be revealed to win
    pub fn safe_cell_count(&self) -> usize {
        self.total_cells - 1
    }
}

/// Stored layout; `total_cells` is derived again from `grid_size`
#[derive(Deserialize)]
struct RawRoundConfig {
    grid_size: u32,
    hazard_index: usize,
    #[serde(default)]
    bonus_indices: Vec<usize>,
}

impl TryFrom<RawRoundConfig> for RoundConfig {
    type Error = GameError;

    fn try_from(raw: RawRoundConfig) -> Result<Self> {
        Self::new(raw.grid_size, raw.hazard_index, raw.bonus_indices)
    }
}

/// Number of boxes in a `grid_size` x `grid_size` grid
pub fn total_cells(grid_size: u32) -> Result<usize> {
    if grid_size == 0 {
        return Err(GameError::DegenerateConfig { grid_size });
    }
    let degenerate = GameError::DegenerateConfig { grid_size };
    let side = usize::try_from(grid_size).map_err(|_| degenerate)?;
    side.checked_mul(side).ok_or(degenerate)
}

pub(crate) fn check_index(index: usize, total_cells: usize) -> Result<usize> {
    if index < total_cells {
        Ok(index)
    } else {
        Err(GameError::InvalidIndex { index, total_cells })
    }
}

/// What a renderer may show for one box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    /// Not clicked yet (contents stay secret)
    Hidden,
    /// Revealed plain box
    Safe,
    /// Revealed surprise box
    Bonus,
    /// Revealed bomb
    Hazard,
}

/// Mutable state of the active round (serialize-only snapshot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundState {
    pub(super) config: RoundConfig,
    pub(super) revealed: BTreeSet<usize>,
    pub(super) score: u64,
    pub(super) status: RoundStatus,
}

impl RoundState {
    /// Fresh round: nothing revealed, score 0, in progress
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            revealed: BTreeSet::new(),
            score: 0,
            status: RoundStatus::InProgress,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    /// Safe boxes still hidden
    pub fn remaining_safe(&self) -> usize {
        let revealed_safe = self
            .revealed
            .iter()
            .filter(|&&i| !self.config.is_hazard(i))
            .count();
        self.config.safe_cell_count() - revealed_safe
    }

    /// Renderer view of a single box, `None` if out of range
    pub fn cell(&self, index: usize) -> Option<CellView> {
        if index >= self.config.total_cells {
            return None;
        }
        let view = if !self.is_revealed(index) {
            CellView::Hidden
        } else if self.config.is_hazard(index) {
            CellView::Hazard
        } else if self.config.is_bonus(index) {
            CellView::Bonus
        } else {
            CellView::Safe
        };
        Some(view)
    }

    /// Row-major views of every box
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        (0..self.config.total_cells).filter_map(|i| self.cell(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_BONUS: [usize; 0] = [];

    #[test]
    fn test_config_filters_hazard_and_duplicate_bonuses() {
        let config = RoundConfig::new(3, 4, [4, 2, 2]).unwrap();
        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.bonus_indices().len(), 1);
        assert!(config.is_bonus(2));
        assert!(!config.is_bonus(4));
    }

    #[test]
    fn test_config_rejects_zero_grid() {
        assert_eq!(
            RoundConfig::new(0, 0, NO_BONUS),
            Err(GameError::DegenerateConfig { grid_size: 0 })
        );
    }

    #[test]
    fn test_config_rejects_out_of_range_positions() {
        assert_eq!(
            RoundConfig::new(3, 9, NO_BONUS),
            Err(GameError::InvalidIndex {
                index: 9,
                total_cells: 9
            })
        );
        assert!(RoundConfig::new(3, 0, [12]).is_err());
    }

    #[test]
    fn test_stored_config_is_validated() {
        let json = r#"{"grid_size":3,"total_cells":9,"hazard_index":40,"bonus_indices":[]}"#;
        assert!(serde_json::from_str::<RoundConfig>(json).is_err());
        let json = r#"{"grid_size":0,"total_cells":0,"hazard_index":0,"bonus_indices":[]}"#;
        assert!(serde_json::from_str::<RoundConfig>(json).is_err());

        let config = RoundConfig::new(3, 4, [4, 2]).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: RoundConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.safe_cell_count(), 8);
    }

    #[test]
    fn test_fresh_state_hides_everything() {
        let state = RoundState::new(RoundConfig::new(3, 4, [2]).unwrap());
        assert_eq!(state.status(), RoundStatus::InProgress);
        assert_eq!(state.score(), 0);
        assert_eq!(state.remaining_safe(), 8);
        assert!(state.cells().all(|c| c == CellView::Hidden));
        assert_eq!(state.cell(9), None);
    }
}
