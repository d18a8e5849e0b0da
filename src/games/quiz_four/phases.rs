//! Turn phases and match outcomes.

use super::Seat;
use serde::{Deserialize, Serialize};

/// Phase of the active turn.
///
/// Stored explicitly on the match record rather than derived from flags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// No quiz word has been issued for this turn yet.
    AwaitingWord,
    /// A word is pending; the active player must answer.
    AwaitingAnswer,
    /// The active player answered correctly and may drop a piece.
    AwaitingMove,
    /// Terminal: somebody won or the board filled up.
    GameOver,
}

impl Phase {
    /// Returns true for the terminal phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A seat connected four.
    Winner(Seat),
    /// The board filled with no winner.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Winner(seat) => Some(*seat),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the match was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(seat) => write!(f, "{} wins", seat),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// How a match looks from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Perspective {
    /// Match still running.
    InProgress,
    /// This player won.
    Won,
    /// The opponent won.
    Lost,
    /// Nobody won.
    Draw,
}
