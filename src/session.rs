//! Synchronization of one match between a local client and the shared store.
//!
//! Writes are read-modify-write cycles: read the record, run the transition
//! on the decoded state, write back what changed (see [`changed_fields`]).
//! There is no compare-and-swap, so two clients whose cycles overlap can lose
//! an update; the last writer's turn wins as a whole. The turn check rules
//! out the common case of both sides making legal moves at once.
//!
//! Reads come from a [`MatchView`], which replaces its cached state with
//! every snapshot the store pushes.

use crate::games::quiz_four::contracts::{InPhase, IsParticipant, OpponentSeated};
use crate::games::quiz_four::{
    AnswerOutcome, GameError, MatchId, MatchState, MoveOutcome, Phase, PlayerId, Word,
};
use crate::identity::Identity;
use crate::record::{changed_fields, decode_state};
use crate::store::{Document, DocumentStore, StoreError, Subscription};
use crate::vocabulary::Vocabulary;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Errors
// ─────────────────────────────────────────────────────────────

/// Failure of a match-level operation.
///
/// Whenever one of these is returned the shared record has not been written.
#[derive(Debug, Clone, derive_more::Display)]
pub enum MatchError {
    /// The transition was rejected by the game rules.
    #[display("{}", _0)]
    Game(GameError),

    /// No record exists for the match id.
    #[display("Match {} not found", _0)]
    NotFound(MatchId),

    /// The second seat is already taken.
    #[display("Match {} already has two players", _0)]
    MatchFull(MatchId),

    /// The caller created this match.
    #[display("Cannot join your own match {}", _0)]
    OwnMatch(MatchId),

    /// The store failed.
    #[display("{}", _0)]
    Remote(StoreError),

    /// The stored record does not decode into a valid match.
    #[display("Malformed match record: {}", _0)]
    MalformedRecord(String),

    /// The vocabulary had no word to give.
    #[display("No quiz word available")]
    VocabularyExhausted,
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Game(e) => Some(e),
            MatchError::Remote(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GameError> for MatchError {
    fn from(err: GameError) -> Self {
        MatchError::Game(err)
    }
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        MatchError::Remote(err)
    }
}

// ─────────────────────────────────────────────────────────────
//  Session (write path)
// ─────────────────────────────────────────────────────────────

/// One player's handle on a shared match.
#[derive(Clone)]
pub struct MatchSession {
    store: Arc<dyn DocumentStore>,
    vocabulary: Arc<dyn Vocabulary>,
    identity: Arc<dyn Identity>,
    match_id: MatchId,
}

impl std::fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("match_id", &self.match_id)
            .field("player_id", &self.identity.current_player_id())
            .finish_non_exhaustive()
    }
}

impl MatchSession {
    /// Binds the collaborators to a match id.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        vocabulary: Arc<dyn Vocabulary>,
        identity: Arc<dyn Identity>,
        match_id: impl Into<MatchId>,
    ) -> Self {
        Self {
            store,
            vocabulary,
            identity,
            match_id: match_id.into(),
        }
    }

    /// The match this session acts on.
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    /// The local player's id.
    pub fn player_id(&self) -> PlayerId {
        self.identity.current_player_id()
    }

    /// Reads and decodes the current record.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotFound`], [`MatchError::Remote`] or
    /// [`MatchError::MalformedRecord`].
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn fetch_state(&self) -> Result<MatchState, MatchError> {
        let document = self
            .store
            .get_record(&self.match_id)
            .await?
            .ok_or_else(|| MatchError::NotFound(self.match_id.clone()))?;
        decode_state(document)
    }

    /// Draws a word and issues it for the current turn.
    ///
    /// Any participant may call this while the match awaits a word, which
    /// covers the case where the vocabulary came up empty when the turn
    /// passed.
    ///
    /// # Errors
    ///
    /// [`GameError::NotAParticipant`], [`GameError::AwaitingOpponent`],
    /// [`GameError::InvalidPhase`], [`MatchError::VocabularyExhausted`], and
    /// store failures.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn issue_word(&self) -> Result<Word, MatchError> {
        let caller = self.player_id();
        let before = self.fetch_state().await?;
        IsParticipant::check(&before, &caller)
            .and_then(|_| InPhase::check(&before, Phase::AwaitingWord))
            .and_then(|_| OpponentSeated::check(&before))
            .inspect_err(|e| warn!(player_id = %caller, error = %e, "Issue word rejected"))?;

        let word = self
            .vocabulary
            .fetch_random_word()
            .await
            .ok_or(MatchError::VocabularyExhausted)?;
        let mut after = before.clone();
        after.issue_word(word.clone())?;

        self.write(&before, &after).await?;
        info!(player_id = %caller, word = %word.original(), "Word issued");
        Ok(word)
    }

    /// Answers the pending word as the local player.
    ///
    /// On a wrong answer the turn passes and, within the same write, a new
    /// word is issued for the opponent.
    ///
    /// # Errors
    ///
    /// [`MatchError::Game`] when the rules reject the answer, plus store and
    /// decode failures. The record is untouched in every error case.
    #[instrument(skip(self, text), fields(match_id = %self.match_id))]
    pub async fn submit_answer(&self, text: &str) -> Result<AnswerOutcome, MatchError> {
        let caller = self.player_id();
        let before = self.fetch_state().await?;

        let mut after = before.clone();
        let outcome = after.submit_answer(&caller, text)?;
        if outcome == AnswerOutcome::Incorrect {
            self.issue_follow_up(&mut after).await?;
        }

        self.write(&before, &after).await?;
        info!(player_id = %caller, ?outcome, next = %after.current_player(), "Answer recorded");
        Ok(outcome)
    }

    /// Drops the local player's piece into `column`.
    ///
    /// When the match continues, the turn passes and a new word is issued
    /// for the opponent in the same write.
    ///
    /// # Errors
    ///
    /// [`MatchError::Game`] when the rules reject the move, plus store and
    /// decode failures. The record is untouched in every error case.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn submit_move(&self, column: usize) -> Result<MoveOutcome, MatchError> {
        let caller = self.player_id();
        let before = self.fetch_state().await?;

        let mut after = before.clone();
        let outcome = after.submit_move(&caller, column)?;
        if !after.phase().is_terminal() {
            self.issue_follow_up(&mut after).await?;
        }

        self.write(&before, &after).await?;
        info!(
            player_id = %caller,
            column,
            row = outcome.row,
            result = ?outcome.result,
            "Move recorded"
        );
        debug!(board = %after.board().render(), "Board after move");
        Ok(outcome)
    }

    /// Subscribes to the match record.
    ///
    /// # Errors
    ///
    /// [`MatchError::Remote`] if the store refuses the subscription.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn subscribe(&self) -> Result<MatchView, MatchError> {
        let subscription = self.store.subscribe(&self.match_id).await?;
        Ok(MatchView::new(subscription))
    }

    /// Issues the opponent's word after the turn passed.
    ///
    /// An empty vocabulary leaves the match in `AwaitingWord`.
    async fn issue_follow_up(&self, next: &mut MatchState) -> Result<(), MatchError> {
        if next.phase() != Phase::AwaitingWord {
            return Ok(());
        }
        match self.vocabulary.fetch_random_word().await {
            Some(word) => {
                next.issue_word(word)?;
                Ok(())
            }
            None => {
                warn!(match_id = %self.match_id, "No word for the next turn; waiting for issue_word");
                Ok(())
            }
        }
    }

    /// Writes the fields that differ between the read and computed states.
    async fn write(&self, before: &MatchState, after: &MatchState) -> Result<(), MatchError> {
        let fields = changed_fields(before, after)?;
        if fields.is_empty() {
            debug!(match_id = %self.match_id, "Nothing changed; skipping write");
            return Ok(());
        }
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        debug!(match_id = %self.match_id, ?keys, "Writing fields");
        self.store.update_fields(&self.match_id, fields).await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  View (read path)
// ─────────────────────────────────────────────────────────────

/// Effect of one delivered snapshot on the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SnapshotUpdate {
    /// The cache was replaced with a different state.
    Replaced,
    /// The snapshot matched the cache; nothing changed.
    Unchanged,
}

/// Local cache of a match, kept current by store snapshots.
#[derive(Debug)]
pub struct MatchView {
    subscription: Subscription,
    state: Option<MatchState>,
}

impl MatchView {
    /// Wraps a subscription. The cache is empty until the first snapshot.
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            state: None,
        }
    }

    /// Id of the watched record.
    pub fn match_id(&self) -> &str {
        self.subscription.id()
    }

    /// Last accepted state.
    pub fn state(&self) -> Option<&MatchState> {
        self.state.as_ref()
    }

    /// Reconciles one snapshot into the cache.
    ///
    /// A valid snapshot fully replaces the cache. A malformed one is reported
    /// and the cache is kept.
    ///
    /// # Errors
    ///
    /// [`MatchError::MalformedRecord`] when the snapshot does not decode.
    #[instrument(skip(self, snapshot), fields(match_id = %self.subscription.id()))]
    pub fn apply_snapshot(&mut self, snapshot: Document) -> Result<SnapshotUpdate, MatchError> {
        let incoming = decode_state(snapshot).inspect_err(|e| {
            warn!(error = %e, "Discarding snapshot");
        })?;
        if self.state.as_ref() == Some(&incoming) {
            debug!("Snapshot matches cache");
            return Ok(SnapshotUpdate::Unchanged);
        }
        debug!(
            phase = %incoming.phase(),
            current = %incoming.current_player(),
            "Snapshot replaces cache"
        );
        self.state = Some(incoming);
        Ok(SnapshotUpdate::Replaced)
    }

    /// Waits for the next snapshot and applies it.
    ///
    /// Returns `None` once the subscription has ended.
    pub async fn next(&mut self) -> Option<Result<SnapshotUpdate, MatchError>> {
        let snapshot = self.subscription.recv().await?;
        Some(self.apply_snapshot(snapshot))
    }

    /// Stops receiving snapshots.
    pub fn cancel(self) {
        debug!(match_id = %self.subscription.id(), "Match view closed");
        self.subscription.cancel();
    }
}
