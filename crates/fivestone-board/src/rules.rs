//! Win detection: scanning for an unbroken run of same-coloured stones.

use crate::board::{Board, Stone};

/// The four scan axes. Each axis is checked in both directions from the
/// anchor cell, so these cover all eight neighbour directions.
const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal
    (1, -1), // anti-diagonal
];

/// Returns `true` if the stone at `(row, col)` completes an unbroken
/// straight run of at least `run_len` same-coloured stones.
///
/// Only lines through the anchor cell are scanned. Because stones are
/// never removed, checking each placement as it lands is enough to
/// catch every run the moment it first exists. Runs longer than
/// `run_len` count.
pub fn has_run(board: &Board, row: usize, col: usize, stone: Stone, run_len: usize) -> bool {
    if board.stone_at(row, col) != Some(stone) {
        return false;
    }
    AXES.iter().any(|&(dr, dc)| {
        let run = 1
            + count_dir(board, row, col, dr, dc, stone)
            + count_dir(board, row, col, -dr, -dc, stone);
        run >= run_len
    })
}

/// Counts consecutive same-coloured stones from `(row, col)` along
/// `(dr, dc)`, excluding the anchor cell itself.
fn count_dir(board: &Board, row: usize, col: usize, dr: isize, dc: isize, stone: Stone) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while r >= 0
        && c >= 0
        && board.stone_at(r as usize, c as usize) == Some(stone)
    {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Places a sequence of same-coloured stones, asserting each lands.
    fn fill(board: &mut Board, stone: Stone, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            board.place(row, col, stone).unwrap();
        }
    }

    #[test]
    fn test_horizontal_run_wins() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::Black, &[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)]);

        assert!(has_run(&board, 7, 7, Stone::Black, 5));
    }

    #[test]
    fn test_vertical_run_wins() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::White, &[(2, 9), (3, 9), (4, 9), (5, 9), (6, 9)]);

        assert!(has_run(&board, 2, 9, Stone::White, 5));
    }

    #[test]
    fn test_diagonal_run_wins() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::Black, &[(4, 4), (5, 5), (6, 6), (7, 7), (8, 8)]);

        assert!(has_run(&board, 6, 6, Stone::Black, 5));
    }

    #[test]
    fn test_anti_diagonal_run_wins() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::White, &[(4, 10), (5, 9), (6, 8), (7, 7), (8, 6)]);

        assert!(has_run(&board, 8, 6, Stone::White, 5));
    }

    #[test]
    fn test_run_completed_in_the_middle_wins() {
        // Two stones on each side; the anchor bridges them.
        let mut board = Board::new(15);
        fill(&mut board, Stone::Black, &[(7, 3), (7, 4), (7, 6), (7, 7)]);

        assert!(!has_run(&board, 7, 4, Stone::Black, 5));

        board.place(7, 5, Stone::Black).unwrap();
        assert!(has_run(&board, 7, 5, Stone::Black, 5));
    }

    #[test]
    fn test_overlength_run_wins() {
        // Six in a row still counts as a run of five.
        let mut board = Board::new(15);
        fill(
            &mut board,
            Stone::Black,
            &[(7, 2), (7, 3), (7, 4), (7, 6), (7, 7), (7, 8)],
        );

        board.place(7, 5, Stone::Black).unwrap();
        assert!(has_run(&board, 7, 5, Stone::Black, 5));
    }

    #[test]
    fn test_four_is_not_five() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::Black, &[(7, 4), (7, 5), (7, 6), (7, 7)]);

        assert!(!has_run(&board, 7, 7, Stone::Black, 5));
    }

    #[test]
    fn test_gap_breaks_run() {
        let mut board = Board::new(15);
        fill(
            &mut board,
            Stone::Black,
            &[(7, 3), (7, 4), (7, 6), (7, 7), (7, 8)],
        );

        // (7, 5) is empty, so neither side reaches five.
        assert!(!has_run(&board, 7, 8, Stone::Black, 5));
    }

    #[test]
    fn test_opponent_stone_breaks_run() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::Black, &[(7, 3), (7, 4), (7, 6), (7, 7), (7, 8)]);
        board.place(7, 5, Stone::White).unwrap();

        assert!(!has_run(&board, 7, 8, Stone::Black, 5));
    }

    #[test]
    fn test_run_against_board_edge() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::White, &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);

        assert!(has_run(&board, 0, 0, Stone::White, 5));
    }

    #[test]
    fn test_anchor_must_hold_the_stone() {
        let mut board = Board::new(15);
        fill(&mut board, Stone::Black, &[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)]);

        // Empty anchor, or an anchor of the other colour, never matches.
        assert!(!has_run(&board, 7, 8, Stone::Black, 5));
        assert!(!has_run(&board, 7, 7, Stone::White, 5));
    }

    #[test]
    fn test_shorter_run_length_config() {
        // A three-in-a-row variant on a small board.
        let mut board = Board::new(5);
        fill(&mut board, Stone::Black, &[(1, 1), (2, 2), (3, 3)]);

        assert!(has_run(&board, 3, 3, Stone::Black, 3));
        assert!(!has_run(&board, 3, 3, Stone::Black, 4));
    }
}
