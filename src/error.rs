//! Error types for the round engine and storage backends

use thiserror::Error;

/// Errors raised by round generation, click resolution and session setup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("box {index} is outside the grid ({total_cells} boxes)")]
    InvalidIndex { index: usize, total_cells: usize },

    #[error("grid size {grid_size} cannot hold a round")]
    DegenerateConfig { grid_size: u32 },

    #[error("levels start at 1")]
    InvalidLevel,

    #[error("player name must not be empty")]
    EmptyPlayerName,
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Errors surfaced by key-value storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
