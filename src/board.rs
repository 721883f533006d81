use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Largest side length a board may have.
pub const MAX_BOARD_SIZE: usize = 64;

/// A player's marker. `X` always moves first.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Cell {
    Empty,
    Occupied(Mark),
}

impl Cell {
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Square grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    size: usize,
    cells: Vec<Cell>,
}

impl GameBoard {
    pub fn new(size: usize) -> Result<GameBoard, GameError> {
        let cell_count = size
            .checked_mul(size)
            .filter(|_| (1..=MAX_BOARD_SIZE).contains(&size))
            .ok_or(GameError::InvalidSize(size))?;
        Ok(GameBoard {
            size,
            cells: vec![Cell::Empty; cell_count],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index_of(row, col).map(|index| self.cells[index])
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Writes `mark` into an empty in-range cell. Returns false when the cell
    /// is occupied or out of range.
    pub(crate) fn update_cell(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        match self.index_of(row, col) {
            Some(index) if self.cells[index] == Cell::Empty => {
                self.cells[index] = Cell::Occupied(mark);
                true
            }
            _ => false,
        }
    }

    /// Every full-length line as `(row, col)` coordinates: rows first, then
    /// columns, then the main diagonal and the anti-diagonal.
    pub fn lines(&self) -> impl Iterator<Item = Vec<(usize, usize)>> + '_ {
        let n = self.size;
        let rows = (0..n).map(move |r| (0..n).map(|c| (r, c)).collect::<Vec<_>>());
        let columns = (0..n).map(move |c| (0..n).map(|r| (r, c)).collect::<Vec<_>>());
        let diagonal = std::iter::once((0..n).map(|i| (i, i)).collect::<Vec<_>>());
        let anti_diagonal = std::iter::once((0..n).map(|i| (i, n - 1 - i)).collect::<Vec<_>>());
        rows.chain(columns).chain(diagonal).chain(anti_diagonal)
    }

    /// Owner of the first line, in `lines()` order, held entirely by one mark.
    pub fn check_winner(&self) -> Option<Mark> {
        self.lines().find_map(|line| self.line_owner(&line))
    }

    pub fn line_owner(&self, line: &[(usize, usize)]) -> Option<Mark> {
        let mut cells = line.iter().map(|&(r, c)| self.get(r, c).and_then(Cell::mark));
        let first = cells.next()??;
        cells.all(|owner| owner == Some(first)).then_some(first)
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        GameBoard {
            size: DEFAULT_BOARD_SIZE,
            cells: vec![Cell::Empty; DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE],
        }
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str("|")?;
                }
                match cell {
                    Cell::Empty => f.write_str(".")?,
                    Cell::Occupied(mark) => write!(f, "{mark}")?,
                }
            }
        }
        Ok(())
    }
}
