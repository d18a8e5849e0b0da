//! Draw detection for quiz-gated Connect Four.

use super::super::{Board, Cell, Seat};
use super::win::check_win;
use tracing::instrument;

/// Checks if every cell is occupied.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    (0..board.rows()).all(|r| (0..board.cols()).all(|c| board.get(r, c) != Some(Cell::Empty)))
}

/// A full board on which neither seat has four in a row.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && !check_win(board, Seat::PlayerOne) && !check_win(board, Seat::PlayerTwo)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Column sequence (player one first, strictly alternating) that fills
    /// the 6×7 board without anyone connecting four.
    const DRAW_SEQUENCE: [usize; 42] = [
        5, 3, 2, 3, 1, 5, 3, 1, 0, 1, 4, 1, 2, 5, 0, 5, 6, 6, 2, 0, 6, 0, 4, 2, 3, 0, 3, 4, 2,
        3, 2, 6, 1, 1, 5, 4, 6, 6, 0, 4, 4, 5,
    ];

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_alternating_fill_is_draw() {
        let mut board = Board::new();
        let mut seat = Seat::PlayerOne;
        for column in DRAW_SEQUENCE {
            board.drop_piece(column, seat).unwrap();
            seat = seat.opponent();
        }
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        let mut board = Board::with_dimensions(4, 4);
        for _ in 0..4 {
            for column in 0..4 {
                board.drop_piece(column, Seat::PlayerOne).unwrap();
            }
        }
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
