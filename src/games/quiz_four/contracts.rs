//! Contract-based validation for match transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, transition)} transition {Q(before, after)}`.

use super::action::{GameError, Transition};
use super::invariants::describe_violations;
use super::{Cell, MatchState, Phase};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the caller holds a seat in the match.
pub struct IsParticipant;

impl IsParticipant {
    /// Checks that `caller` is `player1` or `player2`.
    pub fn check(state: &MatchState, caller: &str) -> Result<(), GameError> {
        if state.seat_of(caller).is_none() {
            return Err(GameError::NotAParticipant(caller.to_string()));
        }
        Ok(())
    }
}

/// Precondition: it is the caller's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks that `caller` is the current player.
    pub fn check(state: &MatchState, caller: &str) -> Result<(), GameError> {
        if state.current_player() != caller {
            return Err(GameError::NotYourTurn(caller.to_string()));
        }
        Ok(())
    }
}

/// Precondition: both seats are taken.
pub struct OpponentSeated;

impl OpponentSeated {
    /// Fails with [`GameError::AwaitingOpponent`] until `player2` joins.
    pub fn check(state: &MatchState) -> Result<(), GameError> {
        if state.player2().is_none() {
            return Err(GameError::AwaitingOpponent);
        }
        Ok(())
    }
}

/// Precondition: the match is in the given phase.
pub struct InPhase;

impl InPhase {
    /// Checks that the match is in `expected`.
    pub fn check(state: &MatchState, expected: Phase) -> Result<(), GameError> {
        if state.phase() != expected {
            return Err(GameError::InvalidPhase {
                expected,
                actual: state.phase(),
            });
        }
        Ok(())
    }
}

/// Precondition: the match has not ended.
pub struct NotOver;

impl NotOver {
    /// Fails with [`GameError::InvalidPhase`] once the match is over.
    pub fn check(state: &MatchState, expected: Phase) -> Result<(), GameError> {
        if state.phase().is_terminal() {
            return Err(GameError::InvalidPhase {
                expected,
                actual: state.phase(),
            });
        }
        Ok(())
    }
}

/// Precondition: the column can take another piece.
pub struct ColumnOpen;

impl ColumnOpen {
    /// Checks that `column` is on the board and not full.
    pub fn check(state: &MatchState, column: usize) -> Result<(), GameError> {
        let board = state.board();
        if column >= board.cols() {
            return Err(GameError::ColumnOutOfRange {
                column,
                columns: board.cols(),
            });
        }
        if !board.is_valid_drop(column) {
            return Err(GameError::ColumnFull { column });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for every match transition.
///
/// Preconditions (checked in this order):
/// - Issue word: match not over, phase is awaiting a word, second seat taken
/// - Answer: match running, caller's turn, a word is pending
/// - Move: match running, caller's turn, answer accepted, column open
///
/// A caller without a seat is never the current player, so answers and
/// moves from strangers fail the turn check.
///
/// Postconditions:
/// - All match invariants hold
/// - Seats never change
/// - Existing pieces never change and at most one piece is added
pub struct TransitionContract;

impl Contract<MatchState, Transition> for TransitionContract {
    #[instrument(skip(state), fields(phase = %state.phase(), current = %state.current_player()))]
    fn pre(state: &MatchState, action: &Transition) -> Result<(), GameError> {
        let result = match action {
            Transition::IssueWord(_) => InPhase::check(state, Phase::AwaitingWord)
                .and_then(|_| OpponentSeated::check(state)),
            Transition::Answer { caller, .. } => NotOver::check(state, Phase::AwaitingAnswer)
                .and_then(|_| PlayersTurn::check(state, caller))
                .and_then(|_| InPhase::check(state, Phase::AwaitingAnswer)),
            Transition::Move { caller, column } => NotOver::check(state, Phase::AwaitingMove)
                .and_then(|_| PlayersTurn::check(state, caller))
                .and_then(|_| InPhase::check(state, Phase::AwaitingMove))
                .and_then(|_| ColumnOpen::check(state, *column)),
        };
        if let Err(e) = &result {
            warn!(error = %e, "Transition rejected");
        }
        result
    }

    fn post(before: &MatchState, after: &MatchState) -> Result<(), GameError> {
        describe_violations(after)
            .map_err(|d| GameError::InvariantViolation(format!("Postcondition failed: {}", d)))?;

        if before.player1() != after.player1() || before.player2() != after.player2() {
            return Err(GameError::InvariantViolation(
                "Seats changed during a transition".to_string(),
            ));
        }

        if !pieces_preserved(before, after) {
            return Err(GameError::InvariantViolation(
                "Board lost or rewrote a piece, or gained more than one".to_string(),
            ));
        }

        Ok(())
    }
}

/// Every piece of `before` is still in place and at most one was added.
fn pieces_preserved(before: &MatchState, after: &MatchState) -> bool {
    let (b, a) = (before.board(), after.board());
    if b.rows() != a.rows() || b.cols() != a.cols() {
        return false;
    }
    let mut added = 0;
    for row in 0..b.rows() {
        for col in 0..b.cols() {
            match (b.get(row, col), a.get(row, col)) {
                (Some(Cell::Empty), Some(Cell::Occupied(_))) => added += 1,
                (x, y) if x == y => {}
                _ => return false,
            }
        }
    }
    added <= 1
}
