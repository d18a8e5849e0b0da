//! Terminal invariant: game over exactly when someone won or the board filled.

use super::super::{MatchState, Phase, Seat};
use super::Invariant;

/// Invariant: a recorded winner really has four in a row and ends the match;
/// a running match has no winner on the board and a free cell left.
pub struct TerminalInvariant;

impl Invariant<MatchState> for TerminalInvariant {
    fn holds(state: &MatchState) -> bool {
        let board = state.board();
        match (state.phase(), state.winner()) {
            (Phase::GameOver, Some(seat)) => board.check_win(seat),
            (Phase::GameOver, None) => board.is_draw(),
            (_, Some(_)) => false,
            (_, None) => {
                !board.is_full()
                    && !board.check_win(Seat::PlayerOne)
                    && !board.check_win(Seat::PlayerTwo)
            }
        }
    }

    fn description() -> &'static str {
        "Match ends exactly on a connect-four or a full board"
    }
}
