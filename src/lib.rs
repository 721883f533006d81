//! Two-player tic-tac-toe.
//!
//! [`game::GameState`] is the whole rule set: a square board, whose turn it
//! is, move validation and win/tie detection. The remaining modules put a
//! browser page in front of it, one game per WebSocket connection.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod message;
pub mod resources;
pub mod server;
pub mod session;

pub use board::{Cell, GameBoard, Mark};
pub use error::{GameError, ServerError};
pub use game::{GameState, MoveResult, Outcome, Rejection};
