//! Match lifecycle: creating a match and claiming its second seat.

use crate::games::quiz_four::{AdmitError, Board, DEFAULT_COLS, DEFAULT_ROWS, MatchId, MatchState};
use crate::identity::Identity;
use crate::record::{changed_fields, decode_state, encode_state};
use crate::session::{MatchError, MatchSession};
use crate::store::DocumentStore;
use crate::vocabulary::Vocabulary;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Entry point for creating and joining matches.
#[derive(Clone)]
pub struct Lobby {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn Identity>,
    rows: usize,
    cols: usize,
}

impl std::fmt::Debug for Lobby {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lobby")
            .field("player_id", &self.identity.current_player_id())
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

impl Lobby {
    /// Creates a lobby that opens matches on the standard 6×7 board.
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn Identity>) -> Self {
        Self {
            store,
            identity,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }

    /// Uses a different board size for new matches.
    pub fn with_board_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Creates a match with the local player as `player1` and current player.
    ///
    /// # Errors
    ///
    /// [`MatchError::Remote`] if the record could not be created.
    #[instrument(skip(self), fields(rows = self.rows, cols = self.cols))]
    pub async fn create_match(&self) -> Result<MatchId, MatchError> {
        let player = self.identity.current_player_id();
        let state = MatchState::with_board(player.clone(), Board::with_dimensions(self.rows, self.cols));
        let match_id = self.store.create_record(encode_state(&state)?).await?;
        info!(match_id = %match_id, player_id = %player, "Match created");
        Ok(match_id)
    }

    /// Claims the second seat of `match_id` for the local player.
    ///
    /// The check and the write are separate store calls, so two joiners
    /// racing for the same seat can both succeed; the later write wins.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotFound`], [`MatchError::MatchFull`],
    /// [`MatchError::OwnMatch`] and store failures. Nothing is written on
    /// failure.
    #[instrument(skip(self))]
    pub async fn join_match(&self, match_id: &str) -> Result<MatchState, MatchError> {
        let player = self.identity.current_player_id();
        let document = self
            .store
            .get_record(match_id)
            .await?
            .ok_or_else(|| MatchError::NotFound(match_id.to_string()))?;
        let before = decode_state(document)?;

        let mut after = before.clone();
        after.admit(&player).map_err(|e| {
            warn!(player_id = %player, error = %e, "Join rejected");
            match e {
                AdmitError::Full => MatchError::MatchFull(match_id.to_string()),
                AdmitError::OwnMatch => MatchError::OwnMatch(match_id.to_string()),
            }
        })?;

        self.store
            .update_fields(match_id, changed_fields(&before, &after)?)
            .await?;
        info!(match_id, player_id = %player, "Joined match");
        Ok(after)
    }

    /// Opens a session on `match_id` as the local player.
    pub fn session(&self, vocabulary: Arc<dyn Vocabulary>, match_id: impl Into<MatchId>) -> MatchSession {
        MatchSession::new(self.store.clone(), vocabulary, self.identity.clone(), match_id)
    }
}
