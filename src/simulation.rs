//! Two automated clients playing one match through a shared store.
//!
//! Each client owns its own [`MatchSession`] and [`MatchView`] and only acts
//! in response to snapshots, exactly like a remote client would. The driver
//! multiplexes both views on one task and stops at game over or after the
//! configured number of actions.

use crate::config::AppConfig;
use crate::games::quiz_four::{Board, MatchId, MatchState, Outcome, PlayerId, Seat, Word};
use crate::identity::FixedIdentity;
use crate::lobby::Lobby;
use crate::session::{MatchError, MatchSession, MatchView, SnapshotUpdate};
use crate::store::{DocumentStore, InMemoryStore};
use crate::vocabulary::{Vocabulary, WordList};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Player strategy
// ─────────────────────────────────────────────────────────────

/// Decision-making for an automated player.
pub trait Strategy: Send {
    /// Text to submit for the pending word.
    fn answer(&mut self, word: &Word) -> String;

    /// Column to drop into, or `None` if the board has no open column.
    fn choose_column(&mut self, board: &Board) -> Option<usize>;
}

/// Answers correctly with a fixed probability and drops into a random open
/// column.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
    accuracy: f64,
}

impl RandomStrategy {
    /// Creates a strategy with the given correct-answer probability.
    pub fn new(accuracy: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }
}

impl Strategy for RandomStrategy {
    fn answer(&mut self, word: &Word) -> String {
        if self.rng.random_bool(self.accuracy) {
            word.translation().to_string()
        } else {
            format!("{}?", word.original())
        }
    }

    fn choose_column(&mut self, board: &Board) -> Option<usize> {
        board.open_columns().choose(&mut self.rng).copied()
    }
}

// ─────────────────────────────────────────────────────────────
//  Client
// ─────────────────────────────────────────────────────────────

/// One automated client: its session, its view and its strategy.
pub struct AutoPlayer {
    session: MatchSession,
    view: MatchView,
    strategy: Box<dyn Strategy>,
}

impl std::fmt::Debug for AutoPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoPlayer")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AutoPlayer {
    /// Creates a client.
    pub fn new(session: MatchSession, view: MatchView, strategy: Box<dyn Strategy>) -> Self {
        Self {
            session,
            view,
            strategy,
        }
    }

    /// The client's player id.
    pub fn player_id(&self) -> PlayerId {
        self.session.player_id()
    }

    /// Takes the action the cached state calls for, if any.
    ///
    /// Returns whether an action was written. A rejection caused by a stale
    /// cache is retried once against a fresh read.
    #[instrument(skip(self), fields(player_id = %self.session.player_id()))]
    pub async fn act(&mut self) -> Result<bool, MatchError> {
        let Some(state) = self.view.state().cloned() else {
            return Ok(false);
        };
        match self.act_on(&state).await {
            Err(MatchError::Game(e)) => {
                warn!(error = %e, "Action rejected; retrying on a fresh read");
                let fresh = self.session.fetch_state().await?;
                self.act_on(&fresh).await
            }
            other => other,
        }
    }

    async fn act_on(&mut self, state: &MatchState) -> Result<bool, MatchError> {
        let me = self.session.player_id();
        if !state.is_turn_of(&me) || state.player2().is_none() {
            return Ok(false);
        }
        if state.awaits_answer_from(&me) {
            let Some(word) = state.word() else {
                return Ok(false);
            };
            let text = self.strategy.answer(word);
            self.session.submit_answer(&text).await?;
            return Ok(true);
        }
        if state.can_move(&me) {
            let Some(column) = self.strategy.choose_column(state.board()) else {
                return Ok(false);
            };
            self.session.submit_move(column).await?;
            return Ok(true);
        }
        self.session.issue_word().await?;
        Ok(true)
    }
}

// ─────────────────────────────────────────────────────────────
//  Driver
// ─────────────────────────────────────────────────────────────

/// Result of a simulated match.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Record id of the match.
    pub match_id: MatchId,
    /// Final outcome, `None` if the match was abandoned.
    pub outcome: Option<Outcome>,
    /// Number of writes performed by both clients.
    pub actions: usize,
    /// Last state seen.
    pub final_state: MatchState,
}

impl SimulationReport {
    /// True if the match reached game over.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Player holding the winning seat.
    pub fn winner_id(&self) -> Option<&str> {
        self.outcome
            .and_then(|o| o.winner())
            .and_then(|seat| self.final_state.player_in(seat))
    }
}

/// Plays one automated match on a fresh in-memory store.
///
/// # Errors
///
/// Store failures and malformed records end the run with an error.
#[instrument(skip(config))]
pub async fn run_simulation(config: &AppConfig) -> Result<SimulationReport, MatchError> {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
    let sim = config.simulation();
    let vocabulary: Arc<dyn Vocabulary> = Arc::new(match sim.seed() {
        Some(seed) => WordList::seeded(config.words().clone(), *seed),
        None => WordList::new(config.words().clone()),
    });

    let lobby_one = Lobby::new(store.clone(), Arc::new(FixedIdentity::new("player-one")))
        .with_board_size(*config.board_rows(), *config.board_cols());
    let lobby_two = Lobby::new(store.clone(), Arc::new(FixedIdentity::new("player-two")));

    let match_id = lobby_one.create_match().await?;
    lobby_two.join_match(&match_id).await?;

    let seed_for = |offset: u64| sim.seed().map(|s| s.wrapping_add(offset));
    let one = join_client(&lobby_one, &vocabulary, &match_id, *sim.accuracy(), seed_for(1)).await?;
    let two = join_client(&lobby_two, &vocabulary, &match_id, *sim.accuracy(), seed_for(2)).await?;

    drive(match_id, one, two, *sim.max_actions()).await
}

/// Opens a session and view for one automated client.
async fn join_client(
    lobby: &Lobby,
    vocabulary: &Arc<dyn Vocabulary>,
    match_id: &str,
    accuracy: f64,
    seed: Option<u64>,
) -> Result<AutoPlayer, MatchError> {
    let session = lobby.session(vocabulary.clone(), match_id);
    let view = session.subscribe().await?;
    Ok(AutoPlayer::new(
        session,
        view,
        Box::new(RandomStrategy::new(accuracy, seed)),
    ))
}

/// Runs two clients until game over, a closed view, or `max_actions`.
#[instrument(skip(one, two))]
pub async fn drive(
    match_id: MatchId,
    mut one: AutoPlayer,
    mut two: AutoPlayer,
    max_actions: usize,
) -> Result<SimulationReport, MatchError> {
    let mut actions = 0;
    let mut last_state = None;

    loop {
        let (seat, update) = tokio::select! {
            update = one.view.next() => (Seat::PlayerOne, update),
            update = two.view.next() => (Seat::PlayerTwo, update),
        };
        let Some(update) = update else {
            warn!(%seat, "Match view closed");
            break;
        };
        if update? == SnapshotUpdate::Unchanged {
            continue;
        }

        let player = match seat {
            Seat::PlayerOne => &mut one,
            Seat::PlayerTwo => &mut two,
        };
        let Some(state) = player.view.state().cloned() else {
            continue;
        };
        debug!(%seat, phase = %state.phase(), current = %state.current_player(), "Snapshot");

        if let Some(outcome) = state.outcome() {
            info!(%outcome, actions, board = %state.board().render(), "Match finished");
            return Ok(SimulationReport {
                match_id,
                outcome: Some(outcome),
                actions,
                final_state: state,
            });
        }
        last_state = Some(state);

        if actions >= max_actions {
            warn!(actions, "Action limit reached; abandoning match");
            break;
        }
        if player.act().await? {
            actions += 1;
        }
    }

    let final_state = match last_state {
        Some(state) => state,
        None => one.session.fetch_state().await?,
    };
    Ok(SimulationReport {
        match_id,
        outcome: None,
        actions,
        final_state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_strategy_always_answers_correctly() {
        let mut strategy = RandomStrategy::new(1.0, Some(5));
        let word = Word::new("gato", "cat");
        for _ in 0..20 {
            assert!(word.accepts(&strategy.answer(&word)));
        }
    }

    #[test]
    fn test_hopeless_strategy_never_answers_correctly() {
        let mut strategy = RandomStrategy::new(0.0, Some(5));
        let word = Word::new("gato", "cat");
        assert!(!word.accepts(&strategy.answer(&word)));
    }

    #[test]
    fn test_choose_column_only_open() {
        let mut strategy = RandomStrategy::new(1.0, Some(9));
        let mut board = Board::with_dimensions(1, 3);
        board.drop_piece(0, Seat::PlayerOne).unwrap();
        board.drop_piece(2, Seat::PlayerTwo).unwrap();
        assert_eq!(strategy.choose_column(&board), Some(1));
        board.drop_piece(1, Seat::PlayerOne).unwrap();
        assert_eq!(strategy.choose_column(&board), None);
    }
}
