//! High score leaderboard system
//!
//! Tracks the top 5 rounds across the whole run. Stored as a plain JSON array
//! of `{name, score}` objects under a single key.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::error::{GameError, Result};
use crate::persistence::{KeyValueStore, load_json, save_json};

/// A single high score entry
///
/// Only built through [`LeaderboardEntry::new`], deserialization included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct LeaderboardEntry {
    /// Player's name (never empty)
    name: String,
    /// Round score
    score: u64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        Ok(Self { name, score })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u64 {
        self.score
    }
}

/// Entry as stored, before validation
#[derive(Deserialize)]
struct RawEntry {
    name: String,
    score: u64,
}

impl TryFrom<RawEntry> for LeaderboardEntry {
    type Error = GameError;

    fn try_from(raw: RawEntry) -> Result<Self> {
        Self::new(raw.name, raw.score)
    }
}

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Insert an entry, keep the board sorted and trimmed.
    ///
    /// Equivalent to append + stable sort descending + truncate, so equal
    /// scores keep insertion order. Returns the rank achieved (1-indexed) or
    /// None if the entry fell off the end.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let index = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    /// Sorted and bounded (names are checked when entries are built)
    pub fn is_well_formed(&self) -> bool {
        self.entries.len() <= MAX_HIGH_SCORES
            && self.entries.windows(2).all(|w| w[0].score >= w[1].score)
    }
}

/// Owns the leaderboard and writes it through to a storage backend
#[derive(Debug)]
pub struct LeaderboardStore<S> {
    store: S,
    board: Leaderboard,
}

impl<S: KeyValueStore> LeaderboardStore<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "leaderboard";

    /// Open the store and load whatever is persisted
    pub fn open(store: S) -> Self {
        let mut this = Self {
            store,
            board: Leaderboard::new(),
        };
        this.board = this.load();
        this
    }

    /// Read the persisted leaderboard.
    ///
    /// Missing, unreadable or malformed data yields an empty board.
    pub fn load(&self) -> Leaderboard {
        let Some(board) = load_json::<Leaderboard>(&self.store, Self::STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Leaderboard::new();
        };

        if !board.is_well_formed() {
            log::warn!("Persisted leaderboard is malformed, starting fresh");
            return Leaderboard::new();
        }

        log::info!("Loaded {} high scores", board.len());
        board
    }

    /// Current in-memory leaderboard
    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    /// Add an entry and persist the board.
    ///
    /// Storage failures are logged; the in-memory board still updates.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        log::info!("Recording {} for {}", entry.score, entry.name);
        let rank = self.board.insert(entry);

        match save_json(&mut self.store, Self::STORAGE_KEY, &self.board) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.board.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
        rank
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
