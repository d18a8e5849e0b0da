//! Turn owner invariant: the current player is seated in the match.

use super::super::MatchState;
use super::Invariant;

/// Invariant: `current_player` is always `player1` or `player2`.
pub struct TurnOwnerInvariant;

impl Invariant<MatchState> for TurnOwnerInvariant {
    fn holds(state: &MatchState) -> bool {
        state.seat_of(state.current_player()).is_some()
    }

    fn description() -> &'static str {
        "Current player is one of the two seated players"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_owns_first_turn() {
        let state = MatchState::new("A");
        assert!(TurnOwnerInvariant::holds(&state));
    }

    #[test]
    fn test_stranger_violates() {
        let mut state = MatchState::new("A");
        state.current_player = "B".to_string();
        assert!(!TurnOwnerInvariant::holds(&state));
    }
}
