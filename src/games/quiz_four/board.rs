//! Board model: a fixed-size grid with gravity.
//!
//! Row `0` is the top row and row `rows - 1` the bottom row, matching the
//! layout of the remote record. Pieces always settle into the lowest empty
//! cell of a column, so within any column the occupied cells form a
//! contiguous run that starts at the bottom.

use super::action::GameError;
use super::rules;
use super::types::{Cell, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Canonical number of rows.
pub const DEFAULT_ROWS: usize = 6;

/// Canonical number of columns.
pub const DEFAULT_COLS: usize = 7;

/// An `rows × cols` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Cells in row-major order, top row first.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty canonical 6×7 board.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Creates an empty board of the given size.
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Builds a board from rows of cells (top row first).
    ///
    /// Returns `None` if the rows are ragged. Gravity is not checked here;
    /// see [`Board::is_gravity_consistent`].
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        Some(Self {
            rows: row_count,
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Returns the board as rows of cells, top row first.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[Cell]>::to_vec).collect()
    }

    /// True iff `column` is on the board and its top cell is empty.
    pub fn is_valid_drop(&self, column: usize) -> bool {
        matches!(self.get(0, column), Some(Cell::Empty))
    }

    /// Columns that can still accept a piece.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&c| self.is_valid_drop(c)).collect()
    }

    /// Row where a piece dropped into `column` would land.
    fn landing_row(&self, column: usize) -> Option<usize> {
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, column) == Some(Cell::Empty))
    }

    /// Drops `seat`'s piece into `column` and returns the row it landed in.
    ///
    /// # Errors
    ///
    /// [`GameError::ColumnOutOfRange`] for a column off the board and
    /// [`GameError::ColumnFull`] for a saturated column. The board is not
    /// touched in either case.
    #[instrument(skip(self), fields(rows = self.rows, cols = self.cols))]
    pub fn drop_piece(&mut self, column: usize, seat: Seat) -> Result<usize, GameError> {
        if column >= self.cols {
            return Err(GameError::ColumnOutOfRange {
                column,
                columns: self.cols,
            });
        }
        let row = self
            .landing_row(column)
            .ok_or(GameError::ColumnFull { column })?;
        self.cells[row * self.cols + column] = Cell::Occupied(seat);
        debug!(row, column, %seat, "Piece dropped");
        Ok(row)
    }

    /// True iff `seat` owns four consecutive cells in any direction.
    pub fn check_win(&self, seat: Seat) -> bool {
        rules::check_win(self, seat)
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// True iff the board is full and nobody has won.
    pub fn is_draw(&self) -> bool {
        rules::is_draw(self)
    }

    /// Number of pieces owned by `seat`.
    pub fn count(&self, seat: Seat) -> usize {
        self.cells.iter().filter(|c| c.is_owned_by(seat)).count()
    }

    /// True iff no column has an empty cell below an occupied one.
    pub fn is_gravity_consistent(&self) -> bool {
        (0..self.cols).all(|col| {
            let mut seen_piece = false;
            (0..self.rows).all(|row| match self.get(row, col) {
                Some(Cell::Occupied(_)) => {
                    seen_piece = true;
                    true
                }
                _ => !seen_piece,
            })
        })
    }

    /// Formats the board as text: `.` empty, `X` player one, `O` player two.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols * 2 + 1));
        for row in 0..self.rows {
            let line: Vec<&str> = (0..self.cols)
                .map(|col| match self.get(row, col) {
                    Some(Cell::Occupied(Seat::PlayerOne)) => "X",
                    Some(Cell::Occupied(Seat::PlayerTwo)) => "O",
                    _ => ".",
                })
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        let footer: Vec<String> = (0..self.cols).map(|c| c.to_string()).collect();
        out.push_str(&footer.join(" "));
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
