//! Wire shape of a match record in the document store.
//!
//! ```text
//! { board: [[0|1|2; C]; R], player1, player2 | null, currentPlayer,
//!   winner: 0|1|2, word: { original, translation } | null,
//!   turnAnswered, phase }
//! ```
//!
//! `phase` is written by every client; records without it are accepted and
//! the phase is derived from the other fields.

use crate::games::quiz_four::invariants::describe_violations;
use crate::games::quiz_four::{Board, Cell, MatchState, Phase, PlayerId, Seat, Word};
use crate::session::MatchError;
use crate::store::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Serialized match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Rows of cell codes, top row first.
    pub board: Vec<Vec<u8>>,
    /// Match creator.
    pub player1: PlayerId,
    /// Joiner, absent until someone joins.
    #[serde(default)]
    pub player2: Option<PlayerId>,
    /// Whose turn it is.
    pub current_player: PlayerId,
    /// `0` for none, otherwise the winning seat code.
    #[serde(default)]
    pub winner: u8,
    /// Current quiz word.
    #[serde(default)]
    pub word: Option<Word>,
    /// Whether the active player answered this turn's word.
    #[serde(default)]
    pub turn_answered: bool,
    /// Explicit turn phase.
    #[serde(default)]
    pub phase: Option<Phase>,
}

impl MatchRecord {
    /// Encodes a match state.
    pub fn from_state(state: &MatchState) -> Self {
        Self {
            board: state
                .board()
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(Cell::code).collect())
                .collect(),
            player1: state.player1().to_string(),
            player2: state.player2().map(str::to_string),
            current_player: state.current_player().to_string(),
            winner: state.winner().map(Seat::code).unwrap_or(0),
            word: state.word().cloned(),
            turn_answered: state.turn_answered(),
            phase: Some(state.phase()),
        }
    }

    /// Decodes and validates the record.
    ///
    /// # Errors
    ///
    /// [`MatchError::MalformedRecord`] for unknown cell or winner codes,
    /// ragged rows, or a state that breaks a match invariant.
    #[instrument(skip(self), fields(player1 = %self.player1))]
    pub fn into_state(self) -> Result<MatchState, MatchError> {
        let rows = self
            .board
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&code| Cell::from_code(code))
                    .collect::<Option<Vec<Cell>>>()
            })
            .collect::<Option<Vec<Vec<Cell>>>>()
            .ok_or_else(|| MatchError::MalformedRecord("unknown cell code".to_string()))?;
        let board = Board::from_rows(rows)
            .ok_or_else(|| MatchError::MalformedRecord("ragged board rows".to_string()))?;

        let winner = match self.winner {
            0 => None,
            code => Some(Seat::from_code(code).ok_or_else(|| {
                MatchError::MalformedRecord(format!("unknown winner code {}", code))
            })?),
        };

        let phase = match self.phase {
            Some(phase) => phase,
            None => {
                let derived = derive_phase(&board, winner, self.word.as_ref(), self.turn_answered);
                debug!(phase = %derived, "Record has no phase, derived one");
                derived
            }
        };

        let state = MatchState {
            board,
            player1: self.player1,
            player2: self.player2,
            current_player: self.current_player,
            phase,
            word: self.word,
            turn_answered: self.turn_answered,
            winner,
        };

        describe_violations(&state).map_err(|d| {
            warn!(violations = %d, "Rejecting invalid record");
            MatchError::MalformedRecord(d)
        })?;
        Ok(state)
    }

    /// Converts to a store document.
    pub fn to_document(&self) -> Result<Document, MatchError> {
        match serde_json::to_value(self).map_err(|e| MatchError::MalformedRecord(e.to_string()))? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(MatchError::MalformedRecord(
                "record did not serialize to an object".to_string(),
            )),
        }
    }

    /// Parses a store document.
    pub fn from_document(document: Document) -> Result<Self, MatchError> {
        serde_json::from_value(serde_json::Value::Object(document))
            .map_err(|e| MatchError::MalformedRecord(e.to_string()))
    }
}

/// Phase implied by the legacy flag fields.
fn derive_phase(board: &Board, winner: Option<Seat>, word: Option<&Word>, answered: bool) -> Phase {
    if winner.is_some() || board.is_full() {
        Phase::GameOver
    } else if word.is_none() {
        Phase::AwaitingWord
    } else if !answered {
        Phase::AwaitingAnswer
    } else {
        Phase::AwaitingMove
    }
}

/// Decodes a store document straight into a validated state.
pub fn decode_state(document: Document) -> Result<MatchState, MatchError> {
    MatchRecord::from_document(document)?.into_state()
}

/// Encodes a state as a full store document.
pub fn encode_state(state: &MatchState) -> Result<Document, MatchError> {
    MatchRecord::from_state(state).to_document()
}

/// Fields that only make sense together: the board with its winner and the
/// turn bookkeeping that depends on both. Written as one unit.
pub const PLAY_FIELDS: [&str; 6] = [
    "board",
    "currentPlayer",
    "phase",
    "turnAnswered",
    "winner",
    "word",
];

/// Fields to write back after moving from `before` to `after`.
///
/// Seats are written only when they change. If any of [`PLAY_FIELDS`]
/// changed, all of them are written from `after`, so overlapping writers
/// lose updates to the last writer but never leave a record that mixes two
/// writers' turns.
pub fn changed_fields(before: &MatchState, after: &MatchState) -> Result<Document, MatchError> {
    let old = encode_state(before)?;
    let new = encode_state(after)?;
    let play_changed = PLAY_FIELDS
        .iter()
        .any(|key| old.get(*key) != new.get(*key));
    Ok(new
        .into_iter()
        .filter(|(key, value)| {
            if PLAY_FIELDS.contains(&key.as_str()) {
                play_changed
            } else {
                old.get(key) != Some(value)
            }
        })
        .collect())
}
