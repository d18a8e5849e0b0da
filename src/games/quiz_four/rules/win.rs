//! Win detection: four consecutive pieces in any direction.
//!
//! Every window of four cells is scanned once per direction; the result
//! depends only on board contents, never on move history.

use super::super::{Board, Seat};
use tracing::instrument;

/// Number of aligned pieces needed to win.
pub const WIN_LENGTH: usize = 4;

/// Row/column step for each scan direction.
const DIRECTIONS: [(isize, isize); 4] = [
    // Horizontal
    (0, 1),
    // Vertical
    (1, 0),
    // Diagonal, top-left to bottom-right
    (1, 1),
    // Diagonal, bottom-left to top-right
    (-1, 1),
];

/// Checks whether `seat` owns a run of four in any row, column or diagonal.
#[instrument(skip(board), fields(rows = board.rows(), cols = board.cols()))]
pub fn check_win(board: &Board, seat: Seat) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| window_starts(board, dr, dc).any(|(r, c)| window_owned(board, seat, r, c, dr, dc)))
}

/// Returns the seat that has a winning run, if any.
///
/// Player one is reported first if (through an illegal position) both have one.
pub fn winner(board: &Board) -> Option<Seat> {
    [Seat::PlayerOne, Seat::PlayerTwo]
        .into_iter()
        .find(|&seat| check_win(board, seat))
}

/// Start cells of every in-bounds window for a direction.
///
/// Bounds: horizontal windows start in columns `0..=cols-4`, vertical
/// windows in rows `0..=rows-4`, the down-right diagonal in both, and the
/// up-right diagonal in rows `3..rows` and columns `0..=cols-4`.
fn window_starts(board: &Board, dr: isize, dc: isize) -> impl Iterator<Item = (usize, usize)> {
    let span = WIN_LENGTH - 1;
    let rows = board.rows();
    let cols = board.cols();

    let row_range = match dr {
        0 => 0..rows,
        1 => 0..rows.saturating_sub(span),
        _ => span.min(rows)..rows,
    };
    let col_range = match dc {
        0 => 0..cols,
        _ => 0..cols.saturating_sub(span),
    };

    row_range.flat_map(move |r| col_range.clone().map(move |c| (r, c)))
}

fn window_owned(board: &Board, seat: Seat, row: usize, col: usize, dr: isize, dc: isize) -> bool {
    (0..WIN_LENGTH as isize).all(|i| {
        let r = row as isize + dr * i;
        let c = col as isize + dc * i;
        r >= 0
            && c >= 0
            && board
                .get(r as usize, c as usize)
                .is_some_and(|cell| cell.is_owned_by(seat))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_all(board: &mut Board, seat: Seat, columns: &[usize]) {
        for &c in columns {
            board.drop_piece(c, seat).unwrap();
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!check_win(&board, Seat::PlayerOne));
        assert!(!check_win(&board, Seat::PlayerTwo));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_horizontal_at_right_edge() {
        let mut board = Board::new();
        drop_all(&mut board, Seat::PlayerTwo, &[3, 4, 5, 6]);
        assert!(check_win(&board, Seat::PlayerTwo));
        assert!(!check_win(&board, Seat::PlayerOne));
    }

    #[test]
    fn test_vertical_reaching_top_row() {
        let mut board = Board::new();
        drop_all(&mut board, Seat::PlayerTwo, &[6, 6]);
        drop_all(&mut board, Seat::PlayerOne, &[6, 6, 6, 6]);
        assert!(check_win(&board, Seat::PlayerOne));
    }

    #[test]
    fn test_three_is_not_enough() {
        let mut board = Board::new();
        drop_all(&mut board, Seat::PlayerOne, &[0, 1, 2]);
        drop_all(&mut board, Seat::PlayerTwo, &[3]);
        assert!(!check_win(&board, Seat::PlayerOne));
    }

    #[test]
    fn test_rising_diagonal() {
        // X on (5,0) (4,1) (3,2) (2,3), O fills underneath.
        let mut board = Board::new();
        drop_all(&mut board, Seat::PlayerOne, &[0]);
        drop_all(&mut board, Seat::PlayerTwo, &[1]);
        drop_all(&mut board, Seat::PlayerOne, &[1]);
        drop_all(&mut board, Seat::PlayerTwo, &[2, 2]);
        drop_all(&mut board, Seat::PlayerOne, &[2]);
        drop_all(&mut board, Seat::PlayerTwo, &[3, 3, 3]);
        assert!(!check_win(&board, Seat::PlayerOne));
        drop_all(&mut board, Seat::PlayerOne, &[3]);
        assert!(check_win(&board, Seat::PlayerOne));
    }

    #[test]
    fn test_falling_diagonal_at_far_corner() {
        // O on (2,3) (3,4) (4,5) (5,6).
        let mut board = Board::new();
        drop_all(&mut board, Seat::PlayerOne, &[3, 3, 3]);
        drop_all(&mut board, Seat::PlayerTwo, &[3]);
        drop_all(&mut board, Seat::PlayerOne, &[4, 4]);
        drop_all(&mut board, Seat::PlayerTwo, &[4]);
        drop_all(&mut board, Seat::PlayerOne, &[5]);
        drop_all(&mut board, Seat::PlayerTwo, &[5, 6]);
        assert!(check_win(&board, Seat::PlayerTwo));
        assert_eq!(winner(&board), Some(Seat::PlayerTwo));
    }

    #[test]
    fn test_small_board_has_no_windows() {
        let mut board = Board::with_dimensions(3, 3);
        drop_all(&mut board, Seat::PlayerOne, &[0, 1, 2, 0, 1, 2, 0, 1, 2]);
        assert!(!check_win(&board, Seat::PlayerOne));
    }
}
