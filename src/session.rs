use tracing::{debug, info};

use crate::error::GameError;
use crate::game::{GameState, MoveResult, Outcome};
use crate::message::{ClientMessage, ServerMessage};

/// Drives one game for one connected page.
///
/// The session owns its [`GameState`] exclusively and is the only place that
/// decides when turns switch.
#[derive(Debug)]
pub struct GameSession {
    game: GameState,
}

impl GameSession {
    pub fn new(board_size: usize) -> Result<GameSession, GameError> {
        Ok(GameSession {
            game: GameState::with_size(board_size)?,
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// What a freshly connected page needs to draw itself.
    pub fn greeting(&self) -> Vec<ServerMessage> {
        vec![
            ServerMessage::board(self.game.board()),
            ServerMessage::turn(self.game.current_turn()),
        ]
    }

    pub fn process_input(&mut self, input: ClientMessage) -> Result<Vec<ServerMessage>, GameError> {
        match input {
            ClientMessage::Click { row, col } => self.process_click(row, col),
            ClientMessage::Reset => {
                info!("game reset");
                self.game.reset();
                Ok(self.greeting())
            }
        }
    }

    fn process_click(&mut self, row: usize, col: usize) -> Result<Vec<ServerMessage>, GameError> {
        let player = self.game.current_turn();
        if let MoveResult::Rejected(reason) = self.game.apply_move(row, col)? {
            debug!(row, col, ?reason, "click ignored");
            return Ok(Vec::new());
        }

        let figure = ServerMessage::Figure { row, col, mark: player };
        let status = match self.game.evaluate() {
            Outcome::InProgress => {
                self.game.switch_turn();
                ServerMessage::turn(self.game.current_turn())
            }
            Outcome::Won(mark) => {
                info!(winner = %mark, "game won");
                ServerMessage::winner(mark)
            }
            Outcome::Tied => {
                info!("game tied");
                ServerMessage::tie()
            }
        };
        Ok(vec![figure, status])
    }
}
