//! Turn/phase state machine.
//!
//! ```text
//! AwaitingWord --issue_word--> AwaitingAnswer
//! AwaitingAnswer --correct--> AwaitingMove
//! AwaitingAnswer --incorrect--> AwaitingWord (opponent's turn)
//! AwaitingMove --drop--> GameOver | AwaitingWord (opponent's turn)
//! ```
//!
//! Each transition validates its contract first and works on a copy, so a
//! rejected transition leaves the state untouched.

use super::action::{AnswerOutcome, GameError, MoveOutcome, MoveResult, Transition};
use super::contracts::{Contract, TransitionContract};
use super::{MatchState, Phase, Word};
use tracing::{debug, info, instrument};

impl MatchState {
    /// Issues `word` for the active turn (`AwaitingWord → AwaitingAnswer`).
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPhase`] outside `AwaitingWord` (including after the
    /// match ended) and [`GameError::AwaitingOpponent`] before the second
    /// player joined.
    #[instrument(skip(self), fields(current = %self.current_player))]
    pub fn issue_word(&mut self, word: Word) -> Result<(), GameError> {
        let action = Transition::IssueWord(word.clone());
        self.apply(&action, |next| {
            next.word = Some(word);
            next.turn_answered = false;
            next.phase = Phase::AwaitingAnswer;
            Ok(())
        })
    }

    /// Answers the pending word on behalf of `caller`.
    ///
    /// A correct answer opens the move phase. A wrong answer marks the turn
    /// answered, hands the turn to the opponent and returns to
    /// `AwaitingWord`; the caller does not get to move.
    ///
    /// # Errors
    ///
    /// [`GameError::NotYourTurn`] for anyone but the current player, or
    /// [`GameError::InvalidPhase`] when no answer is pending.
    #[instrument(skip(self, text), fields(current = %self.current_player))]
    pub fn submit_answer(&mut self, caller: &str, text: &str) -> Result<AnswerOutcome, GameError> {
        let action = Transition::Answer {
            caller: caller.to_string(),
            text: text.to_string(),
        };
        let mut outcome = AnswerOutcome::Incorrect;
        self.apply(&action, |next| {
            let correct = next.word.as_ref().is_some_and(|w| w.accepts(text));
            next.turn_answered = true;
            if correct {
                next.phase = Phase::AwaitingMove;
                outcome = AnswerOutcome::Correct;
            } else {
                next.pass_turn();
            }
            Ok(())
        })?;
        info!(caller, ?outcome, "Answer submitted");
        Ok(outcome)
    }

    /// Drops `caller`'s piece into `column`.
    ///
    /// Ends the match on a connect-four (winner = mover) or a full board
    /// (draw); otherwise the turn passes to the opponent.
    ///
    /// # Errors
    ///
    /// [`GameError::NotYourTurn`] for anyone but the current player,
    /// [`GameError::InvalidPhase`] outside `AwaitingMove`, and
    /// [`GameError::ColumnOutOfRange`] / [`GameError::ColumnFull`].
    #[instrument(skip(self), fields(current = %self.current_player))]
    pub fn submit_move(&mut self, caller: &str, column: usize) -> Result<MoveOutcome, GameError> {
        let action = Transition::Move {
            caller: caller.to_string(),
            column,
        };
        let mut placed = None;
        self.apply(&action, |next| {
            let seat = next
                .seat_of(caller)
                .ok_or_else(|| GameError::NotAParticipant(caller.to_string()))?;
            let row = next.board.drop_piece(column, seat)?;

            let result = if next.board.check_win(seat) {
                next.winner = Some(seat);
                next.phase = Phase::GameOver;
                MoveResult::Won(seat)
            } else if next.board.is_full() {
                next.phase = Phase::GameOver;
                MoveResult::Draw
            } else {
                next.pass_turn();
                MoveResult::Continue
            };

            placed = Some(MoveOutcome {
                seat,
                row,
                column,
                result,
            });
            Ok(())
        })?;

        let outcome = placed.ok_or_else(|| {
            GameError::InvariantViolation("Move applied without placing a piece".to_string())
        })?;
        info!(caller, row = outcome.row, column, result = ?outcome.result, "Move submitted");
        Ok(outcome)
    }

    /// Hands the turn to the other seat and waits for a new word.
    fn pass_turn(&mut self) {
        if let Some(opponent) = self.opponent_of(&self.current_player).map(str::to_string) {
            debug!(from = %self.current_player, to = %opponent, "Turn passes");
            self.current_player = opponent;
        }
        self.phase = Phase::AwaitingWord;
    }

    /// Checks the contract, runs `step` on a copy and commits it only if the
    /// postcondition holds.
    fn apply<F>(&mut self, action: &Transition, step: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut MatchState) -> Result<(), GameError>,
    {
        TransitionContract::pre(self, action)?;

        let mut next = self.clone();
        step(&mut next)?;

        #[cfg(debug_assertions)]
        TransitionContract::post(self, &next)?;

        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quiz_four::{Outcome, Seat};

    fn joined() -> MatchState {
        let mut state = MatchState::new("A");
        state.admit("B").unwrap();
        state
    }

    fn play_turn(state: &mut MatchState, caller: &str, column: usize) -> MoveOutcome {
        state.issue_word(Word::new("agua", "water")).unwrap();
        assert_eq!(state.submit_answer(caller, "Water").unwrap(), AnswerOutcome::Correct);
        state.submit_move(caller, column).unwrap()
    }

    #[test]
    fn test_issue_word_sets_pending_answer() {
        let mut state = joined();
        state.issue_word(Word::new("casa", "house")).unwrap();
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert!(!state.turn_answered());
        assert_eq!(state.word().map(Word::original), Some("casa"));
    }

    #[test]
    fn test_issue_word_twice_rejected() {
        let mut state = joined();
        state.issue_word(Word::new("casa", "house")).unwrap();
        let before = state.clone();
        assert!(matches!(
            state.issue_word(Word::new("mesa", "table")),
            Err(GameError::InvalidPhase { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_answer_before_word_is_invalid_phase() {
        let mut state = joined();
        assert_eq!(
            state.submit_answer("A", "house"),
            Err(GameError::InvalidPhase {
                expected: Phase::AwaitingAnswer,
                actual: Phase::AwaitingWord,
            })
        );
    }

    #[test]
    fn test_wrong_answer_passes_turn() {
        let mut state = joined();
        state.issue_word(Word::new("casa", "house")).unwrap();
        assert_eq!(state.submit_answer("A", "home").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(state.current_player(), "B");
        assert_eq!(state.phase(), Phase::AwaitingWord);
        assert!(state.turn_answered());
        assert_eq!(
            state.submit_move("A", 0),
            Err(GameError::NotYourTurn("A".to_string()))
        );
    }

    #[test]
    fn test_move_without_answer_rejected() {
        let mut state = joined();
        state.issue_word(Word::new("casa", "house")).unwrap();
        assert!(matches!(
            state.submit_move("A", 0),
            Err(GameError::InvalidPhase { .. })
        ));
        assert!(state.board().open_columns().len() == 7);
    }

    #[test]
    fn test_full_column_leaves_state_unchanged() {
        let mut state = joined();
        for i in 0..6 {
            let caller = if i % 2 == 0 { "A" } else { "B" };
            play_turn(&mut state, caller, 0);
        }
        state.issue_word(Word::new("agua", "water")).unwrap();
        state.submit_answer("A", "water").unwrap();
        let before = state.clone();
        assert_eq!(state.submit_move("A", 0), Err(GameError::ColumnFull { column: 0 }));
        assert_eq!(state, before);
        assert!(state.can_move("A"));
    }

    #[test]
    fn test_vertical_four_wins() {
        let mut state = joined();
        for (caller, column) in [("A", 3), ("B", 0), ("A", 3), ("B", 1), ("A", 3), ("B", 0)] {
            let outcome = play_turn(&mut state, caller, column);
            assert_eq!(outcome.result, MoveResult::Continue);
        }
        let last = play_turn(&mut state, "A", 3);
        assert_eq!(last.result, MoveResult::Won(Seat::PlayerOne));
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.outcome(), Some(Outcome::Winner(Seat::PlayerOne)));

        let before = state.clone();
        assert!(matches!(
            state.issue_word(Word::new("fin", "end")),
            Err(GameError::InvalidPhase { .. })
        ));
        assert!(matches!(
            state.submit_move("B", 4),
            Err(GameError::InvalidPhase { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_stranger_is_never_on_turn() {
        let mut state = joined();
        state.issue_word(Word::new("casa", "house")).unwrap();
        let before = state.clone();
        assert_eq!(
            state.submit_answer("Z", "house"),
            Err(GameError::NotYourTurn("Z".to_string()))
        );
        state.submit_answer("A", "house").unwrap();
        let answered = state.clone();
        assert_eq!(
            state.submit_move("Z", 0),
            Err(GameError::NotYourTurn("Z".to_string()))
        );
        assert_eq!(state, answered);
        assert_ne!(before, answered);
    }
}
