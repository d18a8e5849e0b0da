//! Answer gate invariant: the quiz guards every move.

use super::super::{MatchState, Phase};
use super::Invariant;

/// Invariant: a pending answer needs a word and an unanswered turn; a
/// pending move needs a word that was answered.
pub struct AnswerGateInvariant;

impl Invariant<MatchState> for AnswerGateInvariant {
    fn holds(state: &MatchState) -> bool {
        match state.phase() {
            Phase::AwaitingAnswer => state.word().is_some() && !state.turn_answered(),
            Phase::AwaitingMove => state.word().is_some() && state.turn_answered(),
            Phase::AwaitingWord | Phase::GameOver => true,
        }
    }

    fn description() -> &'static str {
        "Moves are only possible after the turn's word was answered"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_without_answer_violates() {
        let mut state = MatchState::new("A");
        state.phase = Phase::AwaitingMove;
        assert!(!AnswerGateInvariant::holds(&state));
    }
}
