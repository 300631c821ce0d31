//! Error types for board operations.

/// Errors that can occur when placing a stone.
///
/// Both are caller-recoverable: a rejected placement leaves the board
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// One or both coordinates lie outside the board.
    #[error("({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// The target cell already holds a stone.
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
}
