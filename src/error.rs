//! Error types for the game core and the server plumbing around it.

use std::path::PathBuf;

use thiserror::Error;

/// Caller misuse of the game core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinate ({row}, {col}) for a {size}x{size} board")]
    InvalidCoordinate { row: usize, col: usize, size: usize },

    #[error("Invalid board size: {0}")]
    InvalidSize(usize),
}

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Could not load resource {path}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed client input: {0}")]
    MalformedInput(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}
