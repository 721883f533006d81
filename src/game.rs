//! Game state for a single two-player match.
//!
//! [`GameState`] only stores cells and whose turn it is. The driver decides
//! when to call [`GameState::switch_turn`]: after an accepted move whose
//! [`GameState::evaluate`] result is still [`Outcome::InProgress`].

use tracing::{debug, trace};

use crate::board::{Cell, GameBoard, Mark};
use crate::error::GameError;

/// Result of a move request that used valid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Accepted,
    Rejected(Rejection),
}

/// Why a move left the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The target cell already holds a mark.
    Occupied,
    /// The game already has a winner or is tied.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Mark),
    Tied,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: GameBoard,
    current_turn: Mark,
}

impl GameState {
    pub fn new() -> GameState {
        GameState {
            board: GameBoard::default(),
            current_turn: Mark::X,
        }
    }

    /// A game on a `size`x`size` board. A line of `size` marks wins.
    pub fn with_size(size: usize) -> Result<GameState, GameError> {
        Ok(GameState {
            board: GameBoard::new(size)?,
            current_turn: Mark::X,
        })
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Places the current turn's mark at `(row, col)`.
    ///
    /// Out-of-range coordinates are a caller bug and return
    /// [`GameError::InvalidCoordinate`]. An occupied cell, or any move after
    /// the game ended, is a normal [`MoveResult::Rejected`]. The turn is never
    /// switched here.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<MoveResult, GameError> {
        let size = self.board.size();
        if row >= size || col >= size {
            return Err(GameError::InvalidCoordinate { row, col, size });
        }
        if self.evaluate().is_terminal() {
            debug!(row, col, "move rejected, game is over");
            return Ok(MoveResult::Rejected(Rejection::GameOver));
        }
        if self.board.update_cell(row, col, self.current_turn) {
            trace!(row, col, mark = %self.current_turn, "move accepted");
            Ok(MoveResult::Accepted)
        } else {
            debug!(row, col, "move rejected, cell occupied");
            Ok(MoveResult::Rejected(Rejection::Occupied))
        }
    }

    /// Checks rows, then columns, then diagonals, then a full board.
    pub fn evaluate(&self) -> Outcome {
        match self.board.check_winner() {
            Some(mark) => Outcome::Won(mark),
            None if self.board.is_full() => Outcome::Tied,
            None => Outcome::InProgress,
        }
    }

    pub fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// Back to an empty board with `X` to move. The board size is kept.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_turn = Mark::X;
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.board.get(row, col)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut GameState, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            assert_eq!(game.apply_move(row, col), Ok(MoveResult::Accepted));
            if game.evaluate() == Outcome::InProgress {
                game.switch_turn();
            }
        }
    }

    #[test]
    fn empty_board_is_in_progress() {
        let game = GameState::new();
        assert_eq!(game.evaluate(), Outcome::InProgress);
        assert_eq!(game.current_turn(), Mark::X);
    }

    #[test]
    fn top_row_wins_for_x() {
        let mut game = GameState::new();
        play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(game.evaluate(), Outcome::Won(Mark::X));
        assert_eq!(game.current_turn(), Mark::X);
    }

    #[test]
    fn alternating_pattern_is_tied() {
        // X O X
        // O X O
        // O X O
        let mut board = GameBoard::default();
        let pattern = [Mark::X, Mark::O, Mark::X, Mark::O, Mark::X, Mark::O, Mark::O, Mark::X, Mark::O];
        for (i, &mark) in pattern.iter().enumerate() {
            assert!(board.update_cell(i / 3, i % 3, mark));
        }
        let game = GameState {
            board,
            current_turn: Mark::X,
        };
        assert_eq!(game.evaluate(), Outcome::Tied);
    }

    #[test]
    fn tie_pattern() {
        // X O X
        // X O O
        // O X X
        let mut game = GameState::new();
        play(
            &mut game,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
        );
        assert_eq!(game.board().to_string(), "X|O|X\nX|O|O\nO|X|X");
        assert_eq!(game.evaluate(), Outcome::Tied);
    }

    #[test]
    fn second_move_on_same_cell_is_rejected() {
        let mut game = GameState::new();
        assert_eq!(game.apply_move(1, 1), Ok(MoveResult::Accepted));
        game.switch_turn();
        assert_eq!(
            game.apply_move(1, 1),
            Ok(MoveResult::Rejected(Rejection::Occupied))
        );
        assert_eq!(game.cell(1, 1), Some(Cell::Occupied(Mark::X)));
        assert_eq!(game.current_turn(), Mark::O);
    }

    #[test]
    fn out_of_range_row_is_an_error() {
        let mut game = GameState::new();
        let before = game.clone();
        assert_eq!(
            game.apply_move(3, 0),
            Err(GameError::InvalidCoordinate { row: 3, col: 0, size: 3 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn moves_after_a_win_are_rejected() {
        let mut game = GameState::new();
        play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let before = game.clone();
        assert_eq!(
            game.apply_move(2, 2),
            Ok(MoveResult::Rejected(Rejection::GameOver))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn moves_after_a_tie_are_rejected() {
        let mut game = GameState::new();
        play(
            &mut game,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
        );
        assert_eq!(game.evaluate(), Outcome::Tied);
        let before = game.clone();
        assert_eq!(
            game.apply_move(1, 1),
            Ok(MoveResult::Rejected(Rejection::GameOver))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn coordinates_are_checked_before_game_over() {
        let mut game = GameState::new();
        play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let before = game.clone();
        assert_eq!(
            game.apply_move(3, 0),
            Err(GameError::InvalidCoordinate { row: 3, col: 0, size: 3 })
        );
        assert_eq!(
            game.apply_move(2, 2),
            Ok(MoveResult::Rejected(Rejection::GameOver))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn reset_restores_initial_configuration() {
        let mut game = GameState::new();
        play(&mut game, &[(0, 0), (1, 1), (2, 2)]);
        game.reset();
        assert_eq!(game, GameState::new());
        assert_eq!(game.evaluate(), Outcome::InProgress);
    }

    #[test]
    fn reset_keeps_custom_size() {
        let mut game = GameState::with_size(4).unwrap();
        play(&mut game, &[(3, 3)]);
        game.reset();
        assert_eq!(game.size(), 4);
        assert!(game.board().cells().iter().all(|&c| c == Cell::Empty));
    }

    #[test]
    fn four_by_four_diagonal_win() {
        let mut game = GameState::with_size(4).unwrap();
        play(
            &mut game,
            &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2), (0, 3), (3, 3)],
        );
        assert_eq!(game.evaluate(), Outcome::Won(Mark::X));
    }

    #[test]
    fn single_cell_board_is_won_by_first_move() {
        let mut game = GameState::with_size(1).unwrap();
        assert_eq!(game.apply_move(0, 0), Ok(MoveResult::Accepted));
        assert_eq!(game.evaluate(), Outcome::Won(Mark::X));
    }

    #[test]
    fn zero_size_is_an_error() {
        assert_eq!(GameState::with_size(0), Err(GameError::InvalidSize(0)));
    }
}
