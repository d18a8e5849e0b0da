//! Game rules for quiz-gated Connect Four.

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_LENGTH, check_win, winner};
