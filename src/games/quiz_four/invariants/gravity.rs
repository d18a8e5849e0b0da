//! Gravity invariant: no floating pieces.

use super::super::MatchState;
use super::Invariant;

/// Invariant: within every column the pieces form a contiguous run from the bottom.
pub struct GravityInvariant;

impl Invariant<MatchState> for GravityInvariant {
    fn holds(state: &MatchState) -> bool {
        state.board().is_gravity_consistent()
    }

    fn description() -> &'static str {
        "Pieces rest on the bottom row or on another piece"
    }
}
