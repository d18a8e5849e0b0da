//! The authoritative match record.

use super::action::AdmitError;
use super::phases::{Outcome, Perspective};
use super::{Board, Phase, PlayerId, Seat, Word};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Complete state of one match, shared by both clients through the store.
///
/// Mutated only through the transitions in the state machine
/// ([`MatchState::issue_word`], [`MatchState::submit_answer`],
/// [`MatchState::submit_move`]) and by admitting the second player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) board: Board,
    pub(crate) player1: PlayerId,
    pub(crate) player2: Option<PlayerId>,
    pub(crate) current_player: PlayerId,
    pub(crate) phase: Phase,
    pub(crate) word: Option<Word>,
    pub(crate) turn_answered: bool,
    pub(crate) winner: Option<Seat>,
}

impl MatchState {
    /// Creates a fresh match on the canonical board, owned by `player1`.
    pub fn new(player1: impl Into<PlayerId>) -> Self {
        Self::with_board(player1, Board::new())
    }

    /// Creates a fresh match on the given (normally empty) board.
    #[instrument(skip(player1, board), fields(rows = board.rows(), cols = board.cols()))]
    pub fn with_board(player1: impl Into<PlayerId>, board: Board) -> Self {
        let player1 = player1.into();
        Self {
            board,
            current_player: player1.clone(),
            player1,
            player2: None,
            phase: Phase::AwaitingWord,
            word: None,
            turn_answered: false,
            winner: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the match creator.
    pub fn player1(&self) -> &str {
        &self.player1
    }

    /// Returns the joiner, if someone has joined.
    pub fn player2(&self) -> Option<&str> {
        self.player2.as_deref()
    }

    /// Returns whose turn it is.
    pub fn current_player(&self) -> &str {
        &self.current_player
    }

    /// Returns the turn phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the quiz word for the active turn.
    pub fn word(&self) -> Option<&Word> {
        self.word.as_ref()
    }

    /// True once the active player answered this turn's word.
    pub fn turn_answered(&self) -> bool {
        self.turn_answered
    }

    /// Returns the winning seat, if any.
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Returns the outcome once the match is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.phase.is_terminal() {
            return None;
        }
        Some(match self.winner {
            Some(seat) => Outcome::Winner(seat),
            None => Outcome::Draw,
        })
    }

    /// Seat held by `player`, if they are in this match.
    pub fn seat_of(&self, player: &str) -> Option<Seat> {
        if self.player1 == player {
            Some(Seat::PlayerOne)
        } else if self.player2.as_deref() == Some(player) {
            Some(Seat::PlayerTwo)
        } else {
            None
        }
    }

    /// Player sitting in `seat`.
    pub fn player_in(&self, seat: Seat) -> Option<&str> {
        match seat {
            Seat::PlayerOne => Some(&self.player1),
            Seat::PlayerTwo => self.player2.as_deref(),
        }
    }

    /// Seat of the current player.
    pub fn current_seat(&self) -> Option<Seat> {
        self.seat_of(&self.current_player)
    }

    /// True if it is `player`'s turn and the match is still running.
    pub fn is_turn_of(&self, player: &str) -> bool {
        !self.phase.is_terminal() && self.current_player == player
    }

    /// True if `player` must answer the pending word.
    pub fn awaits_answer_from(&self, player: &str) -> bool {
        self.is_turn_of(player) && self.phase == Phase::AwaitingAnswer
    }

    /// True if `player` may drop a piece now.
    pub fn can_move(&self, player: &str) -> bool {
        self.is_turn_of(player) && self.phase == Phase::AwaitingMove
    }

    /// How the match stands for `player`.
    pub fn perspective(&self, player: &str) -> Perspective {
        match self.outcome() {
            None => Perspective::InProgress,
            Some(Outcome::Draw) => Perspective::Draw,
            Some(Outcome::Winner(seat)) if self.seat_of(player) == Some(seat) => Perspective::Won,
            Some(Outcome::Winner(_)) => Perspective::Lost,
        }
    }

    /// Seats `player` as `player2`.
    ///
    /// # Errors
    ///
    /// [`AdmitError::OwnMatch`] when the creator tries to join, and
    /// [`AdmitError::Full`] when the second seat is taken.
    #[instrument(skip(self), fields(player1 = %self.player1))]
    pub fn admit(&mut self, player: &str) -> Result<(), AdmitError> {
        if self.player1 == player {
            return Err(AdmitError::OwnMatch);
        }
        if self.player2.is_some() {
            return Err(AdmitError::Full);
        }
        info!(player2 = %player, "Second player admitted");
        self.player2 = Some(player.to_string());
        Ok(())
    }

    /// The other participant, if seated.
    pub(crate) fn opponent_of(&self, player: &str) -> Option<&str> {
        self.seat_of(player)
            .and_then(|seat| self.player_in(seat.opponent()))
    }
}
