//! Transition results and rejection reasons.

use super::{Phase, PlayerId, Seat, Word};
use serde::{Deserialize, Serialize};

/// Result of a quiz answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOutcome {
    /// Correct: the player may now drop a piece.
    Correct,
    /// Wrong: the turn passed to the opponent without a move.
    Incorrect,
}

/// What a successful drop did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveResult {
    /// The mover connected four.
    Won(Seat),
    /// The board is now full with no winner.
    Draw,
    /// Play continues with the opponent.
    Continue,
}

/// A piece placed by [`crate::MatchState::submit_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Who moved.
    pub seat: Seat,
    /// Row the piece landed in (0 = top).
    pub row: usize,
    /// Column the piece was dropped into.
    pub column: usize,
    /// Effect on the match.
    pub result: MoveResult,
}

/// Reasons a transition is rejected. A rejected transition never changes state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The column has no empty cell left.
    #[display("Column {} is full", column)]
    ColumnFull {
        /// Requested column.
        column: usize,
    },

    /// The column is off the board.
    #[display("Column {} is out of range (board has {} columns)", column, columns)]
    ColumnOutOfRange {
        /// Requested column.
        column: usize,
        /// Number of columns on the board.
        columns: usize,
    },

    /// The transition is not legal in the current phase.
    #[display("Expected phase {}, match is in {}", expected, actual)]
    InvalidPhase {
        /// Phase the transition requires.
        expected: Phase,
        /// Phase the match is in.
        actual: Phase,
    },

    /// Caller is not the current player.
    #[display("It is not {}'s turn", _0)]
    NotYourTurn(PlayerId),

    /// Caller is neither `player1` nor `player2`.
    #[display("{} is not playing in this match", _0)]
    NotAParticipant(PlayerId),

    /// The match has no second player yet.
    #[display("Waiting for an opponent to join")]
    AwaitingOpponent,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

/// Reasons a player cannot take the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AdmitError {
    /// The second seat is already taken.
    #[display("Match already has two players")]
    Full,
    /// The creator tried to join their own match.
    #[display("Cannot join your own match")]
    OwnMatch,
}

impl std::error::Error for AdmitError {}

/// A state-machine transition as a first-class value.
///
/// Used by contracts to check preconditions before anything is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Issue a new quiz word for the active turn.
    IssueWord(Word),
    /// Answer the pending word.
    Answer {
        /// Who answers.
        caller: PlayerId,
        /// Raw answer text.
        text: String,
    },
    /// Drop a piece.
    Move {
        /// Who moves.
        caller: PlayerId,
        /// Target column.
        column: usize,
    },
}
