//! The board: a square grid of cells, each empty or holding one stone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BoardError;

// ---------------------------------------------------------------------------
// Stone
// ---------------------------------------------------------------------------

/// A stone colour. The starting player always plays [`Stone::Black`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// Returns the opposing colour.
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "Black"),
            Self::White => write!(f, "White"),
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A fixed-size square grid of cells.
///
/// The size is set at construction and never changes. Moves are
/// monotonic: a placed stone stays where it is for the life of the
/// board, so any position reachable mid-game is a subset of the final
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Row-major cell storage, `size * size` entries.
    cells: Vec<Option<Stone>>,
}

impl Board {
    /// Creates an empty board with the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// The side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Places a stone at `(row, col)`.
    ///
    /// # Errors
    /// - [`BoardError::OutOfBounds`] if either coordinate is outside `[0, size)`.
    /// - [`BoardError::CellOccupied`] if the cell already holds a stone.
    pub fn place(&mut self, row: usize, col: usize, stone: Stone) -> Result<(), BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        let idx = row * self.size + col;
        if self.cells[idx].is_some() {
            return Err(BoardError::CellOccupied { row, col });
        }
        self.cells[idx] = Some(stone);
        Ok(())
    }

    /// Returns the stone at `(row, col)`, or `None` if the cell is empty
    /// or the coordinates are off the board.
    pub fn stone_at(&self, row: usize, col: usize) -> Option<Stone> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row * self.size + col]
    }

    /// Returns `true` if `(row, col)` is on the board and empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col].is_none()
    }

    /// The number of stones currently on the board.
    pub fn stones(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns `true` if every cell holds a stone.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}

// =========================================================================
// Tests
// =========================================================================
