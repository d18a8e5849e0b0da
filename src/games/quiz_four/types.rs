//! Core domain types for quiz-gated Connect Four.

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a player (issued by the identity collaborator).
pub type PlayerId = String;

/// Identifier of a match record in the document store.
pub type MatchId = String;

/// Role a player occupies in a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Seat {
    /// Match creator (`player1`, moves first).
    #[strum(serialize = "player one")]
    PlayerOne,
    /// Joiner (`player2`).
    #[strum(serialize = "player two")]
    PlayerTwo,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::PlayerOne => Seat::PlayerTwo,
            Seat::PlayerTwo => Seat::PlayerOne,
        }
    }

    /// Wire code used in the remote record (`1` or `2`).
    pub fn code(self) -> u8 {
        match self {
            Seat::PlayerOne => 1,
            Seat::PlayerTwo => 2,
        }
    }

    /// Parses a wire code; `0` and unknown values yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Seat::PlayerOne),
            2 => Some(Seat::PlayerTwo),
            _ => None,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Cell holds a piece owned by a seat.
    Occupied(Seat),
}

impl Cell {
    /// Wire code used in the remote record (`0`, `1` or `2`).
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(seat) => seat.code(),
        }
    }

    /// Parses a wire code. Returns `None` for values outside `0..=2`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            other => Seat::from_code(other).map(Cell::Occupied),
        }
    }

    /// Returns true if the cell is owned by `seat`.
    pub fn is_owned_by(self, seat: Seat) -> bool {
        self == Cell::Occupied(seat)
    }
}

/// A quiz prompt: a word and its expected translation.
///
/// Immutable once drawn for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Word {
    /// The word shown to the player.
    #[new(into)]
    original: String,
    /// The expected answer.
    #[new(into)]
    translation: String,
}

impl Word {
    /// Returns the prompt word.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the expected translation.
    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Checks an answer: trimmed, case-insensitive comparison against the translation.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.translation.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_codes_round_trip() {
        assert_eq!(Seat::from_code(Seat::PlayerOne.code()), Some(Seat::PlayerOne));
        assert_eq!(Seat::from_code(0), None);
        assert_eq!(Cell::from_code(3), None);
    }

    #[test]
    fn test_answer_is_trimmed_and_case_insensitive() {
        let word = Word::new("perro", "Dog");
        assert!(word.accepts("  dog "));
        assert!(word.accepts("DOG"));
        assert!(!word.accepts("cat"));
        assert!(!word.accepts("do g"));
    }
}
