//! Quiz-gated Connect Four: board, match state and the turn/phase machine.

mod action;
mod board;
pub mod contracts;
pub mod invariants;
mod machine;
mod phases;
pub mod rules;
mod state;
mod types;

pub use action::{AdmitError, AnswerOutcome, GameError, MoveOutcome, MoveResult, Transition};
pub use board::{Board, DEFAULT_COLS, DEFAULT_ROWS};
pub use phases::{Outcome, Perspective, Phase};
pub use state::MatchState;
pub use types::{Cell, MatchId, PlayerId, Seat, Word};
