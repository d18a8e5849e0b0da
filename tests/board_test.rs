//! Tests for board placement and win/draw detection.

use quiz_four::{Board, Cell, GameError, Seat, WIN_LENGTH, check_win, winner};

/// Column order that fills a 6×7 board, player one first, without any
/// four-in-a-row at any point.
const DRAW_SEQUENCE: [usize; 42] = [
    5, 3, 2, 3, 1, 5, 3, 1, 0, 1, 4, 1, 2, 5, 0, 5, 6, 6, 2, 0, 6, 0, 4, 2, 3, 0, 3, 4, 2, 3, 2,
    6, 1, 1, 5, 4, 6, 6, 0, 4, 4, 5,
];

fn rows(codes: &[&[u8]]) -> Board {
    Board::from_rows(
        codes
            .iter()
            .map(|row| row.iter().map(|&c| Cell::from_code(c).unwrap()).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_empty_board_has_no_winner() {
    let board = Board::new();
    assert!(!board.check_win(Seat::PlayerOne));
    assert!(!board.check_win(Seat::PlayerTwo));
    assert!(!board.is_full());
    assert!(!board.is_draw());
    assert_eq!(winner(&board), None);
}

#[test]
fn test_column_capacity_is_row_count() {
    let mut board = Board::new();
    for expected_row in (0..6).rev() {
        assert_eq!(board.drop_piece(2, Seat::PlayerOne), Ok(expected_row));
    }
    let before = board.clone();
    assert_eq!(
        board.drop_piece(2, Seat::PlayerTwo),
        Err(GameError::ColumnFull { column: 2 })
    );
    assert_eq!(board, before);
    assert!(!board.is_valid_drop(2));
}

#[test]
fn test_out_of_range_column() {
    let mut board = Board::new();
    assert!(!board.is_valid_drop(7));
    assert_eq!(
        board.drop_piece(7, Seat::PlayerOne),
        Err(GameError::ColumnOutOfRange {
            column: 7,
            columns: 7
        })
    );
}

#[test]
fn test_horizontal_win_at_right_edge() {
    let mut board = Board::new();
    for column in 7 - WIN_LENGTH..7 {
        board.drop_piece(column, Seat::PlayerTwo).unwrap();
    }
    assert!(check_win(&board, Seat::PlayerTwo));
    assert!(!check_win(&board, Seat::PlayerOne));
}

#[test]
fn test_three_in_a_row_is_not_a_win() {
    let mut board = Board::new();
    assert_eq!(WIN_LENGTH, 4);
    for column in 7 - (WIN_LENGTH - 1)..7 {
        board.drop_piece(column, Seat::PlayerOne).unwrap();
    }
    assert!(!board.check_win(Seat::PlayerOne));
}

#[test]
fn test_rising_diagonal_win() {
    let board = rows(&[
        &[0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0],
        &[0, 0, 1, 2, 0, 0, 0],
        &[0, 1, 2, 2, 0, 0, 0],
        &[1, 2, 1, 2, 0, 0, 0],
    ]);
    assert!(board.is_gravity_consistent());
    assert!(board.check_win(Seat::PlayerOne));
    assert!(!board.check_win(Seat::PlayerTwo));
}

#[test]
fn test_falling_diagonal_win_in_far_corner() {
    let board = rows(&[
        &[0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 2, 0, 0, 0],
        &[0, 0, 0, 1, 2, 0, 0],
        &[0, 0, 0, 1, 1, 2, 0],
        &[0, 0, 0, 1, 1, 1, 2],
    ]);
    assert!(board.check_win(Seat::PlayerTwo));
    assert!(!board.check_win(Seat::PlayerOne));
}

#[test]
fn test_vertical_win_reaching_top_row() {
    let board = rows(&[
        &[0, 0, 0, 0, 0, 0, 2],
        &[0, 0, 0, 0, 0, 0, 2],
        &[0, 0, 0, 0, 0, 0, 2],
        &[0, 0, 0, 0, 0, 0, 2],
        &[0, 0, 0, 0, 0, 0, 1],
        &[0, 0, 0, 0, 0, 1, 1],
    ]);
    assert_eq!(winner(&board), Some(Seat::PlayerTwo));
}

#[test]
fn test_full_board_without_alignment_is_draw() {
    let mut board = Board::new();
    let mut seat = Seat::PlayerOne;
    for column in DRAW_SEQUENCE {
        board.drop_piece(column, seat).unwrap();
        assert_eq!(winner(&board), None);
        seat = seat.opponent();
    }
    assert!(board.is_full());
    assert!(board.is_draw());
    assert_eq!(board.count(Seat::PlayerOne), 21);
    assert_eq!(board.count(Seat::PlayerTwo), 21);
}

#[test]
fn test_small_board_has_no_windows() {
    let board = rows(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
    assert!(!board.check_win(Seat::PlayerOne));
    assert!(board.is_draw());
}

#[test]
fn test_render() {
    let mut board = Board::with_dimensions(2, 3);
    board.drop_piece(1, Seat::PlayerOne).unwrap();
    board.drop_piece(1, Seat::PlayerTwo).unwrap();
    assert_eq!(board.render(), ". O .\n. X .\n0 1 2");
}
