use futures_channel::mpsc::{TrySendError, UnboundedSender};
use serde::{Deserialize, Serialize};
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{trace, warn};

use crate::board::{GameBoard, Mark};
use crate::error::{ServerError, ServerResult};

/// Frames sent by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    Click { row: usize, col: usize },
    Reset,
}

/// Frames sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// Whole board, row-major. `None` is an empty, clickable cell.
    Board { size: usize, cells: Vec<Option<Mark>> },
    Figure { row: usize, col: usize, mark: Mark },
    Info { text: String },
    /// Game over popup.
    End { text: String },
    Error { text: String },
}

impl ServerMessage {
    pub fn board(board: &GameBoard) -> ServerMessage {
        ServerMessage::Board {
            size: board.size(),
            cells: board.cells().iter().map(|cell| cell.mark()).collect(),
        }
    }

    pub fn turn(mark: Mark) -> ServerMessage {
        ServerMessage::Info {
            text: format!("Player {mark}'s turn"),
        }
    }

    pub fn winner(mark: Mark) -> ServerMessage {
        ServerMessage::End {
            text: format!("Player {mark} wins!"),
        }
    }

    pub fn tie() -> ServerMessage {
        ServerMessage::End {
            text: String::from("It's a tie!"),
        }
    }

    pub fn error(text: impl Into<String>) -> ServerMessage {
        ServerMessage::Error { text: text.into() }
    }
}

pub fn parse_input(input: &Message) -> ServerResult<ClientMessage> {
    let input_text = input
        .to_text()
        .map_err(|_| ServerError::MalformedInput(String::from("expected a text frame")))?;
    trace!(input = input_text, "received message");
    serde_json::from_str(input_text).map_err(|e| ServerError::MalformedInput(e.to_string()))
}

pub fn multi_message_send(sender: &UnboundedSender<Message>, messages: &[ServerMessage]) {
    for message in messages {
        message_send(sender, message);
    }
}

pub fn message_send(sender: &UnboundedSender<Message>, message: &ServerMessage) {
    match serde_json::to_string(message) {
        Ok(text) => sender
            .unbounded_send(Message::Text(text))
            .unwrap_or_else(sent_fail_notify),
        Err(e) => warn!(error = %e, "could not encode message"),
    }
}

fn sent_fail_notify(_: TrySendError<Message>) {
    warn!("could not send message, peer is gone")
}
