//! Round layout generation
//!
//! Randomness is injected through [`IndexSource`] so layouts are
//! reproducible from a seed and scriptable in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{RoundConfig, total_cells};
use crate::consts::BONUS_CANDIDATES;
use crate::error::Result;

/// Uniform integer source over `[0, upper)`
pub trait IndexSource {
    /// Draw an index in `[0, upper)`. Callers guarantee `upper >= 1`.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl<S: IndexSource + ?Sized> IndexSource for &mut S {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

/// Seed wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// PCG-backed index source
#[derive(Debug, Clone)]
pub struct SeededIndices {
    seed: u64,
    rng: Pcg32,
}

impl SeededIndices {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: RngState::new(seed).to_rng(),
        }
    }

    /// Seed from the thread RNG (OS entropy)
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl IndexSource for SeededIndices {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Generate a round layout for a `grid_size` x `grid_size` grid.
///
/// The bomb is drawn first, then two surprise candidates independently of
/// each other. Candidates landing on the bomb are dropped and duplicates
/// collapse, so a round carries 0, 1 or 2 surprises. No redraws.
pub fn generate<R: IndexSource + ?Sized>(grid_size: u32, rng: &mut R) -> Result<RoundConfig> {
    let total = total_cells(grid_size)?;

    let hazard = rng.next_index(total);
    let candidates: Vec<usize> = (0..BONUS_CANDIDATES)
        .map(|_| rng.next_index(total))
        .collect();

    let config = RoundConfig::new(grid_size, hazard, candidates)?;
    log::debug!(
        "Generated {}x{} round: bomb={}, surprises={:?}",
        grid_size,
        grid_size,
        config.hazard_index(),
        config.bonus_indices()
    );
    Ok(config)
}
