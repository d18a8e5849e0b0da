//! Quiz Four library - quiz-gated Connect Four over a shared document store
//!
//! Two clients play one match by reading and writing a single shared record.
//! Before every drop the active player must translate a quiz word; a wrong
//! answer passes the turn.
//!
//! # Architecture
//!
//! - **Games**: board, match state, and the turn/phase state machine (no I/O)
//! - **Store**: document-store interface plus an in-memory backend
//! - **Session**: read-modify-write transitions and snapshot views
//! - **Lobby**: match creation and joining
//! - **Simulation**: two automated clients playing a full match
//!
//! # Example
//!
//! ```no_run
//! use quiz_four::{FixedIdentity, InMemoryStore, Lobby, WordList, default_words};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), quiz_four::MatchError> {
//! let store = Arc::new(InMemoryStore::new());
//! let alice = Lobby::new(store.clone(), Arc::new(FixedIdentity::new("alice")));
//! let bruno = Lobby::new(store.clone(), Arc::new(FixedIdentity::new("bruno")));
//!
//! let match_id = alice.create_match().await?;
//! bruno.join_match(&match_id).await?;
//!
//! let session = alice.session(Arc::new(WordList::new(default_words())), match_id);
//! let word = session.issue_word().await?;
//! session.submit_answer(word.translation()).await?;
//! session.submit_move(3).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod identity;
mod lobby;
mod record;
mod session;
mod simulation;
mod store;
mod vocabulary;

// Crate-level exports - Game core
pub use games::quiz_four::{
    AdmitError, AnswerOutcome, Board, Cell, DEFAULT_COLS, DEFAULT_ROWS, GameError, MatchId,
    MatchState, MoveOutcome, MoveResult, Outcome, Perspective, Phase, PlayerId, Seat, Transition,
    Word,
};

// Crate-level exports - Rules, contracts and invariants
pub use games::quiz_four::contracts::{Contract, TransitionContract};
pub use games::quiz_four::invariants::{Invariant, InvariantSet, MatchInvariants, describe_violations};
pub use games::quiz_four::rules::{WIN_LENGTH, check_win, is_draw, is_full, winner};

// Crate-level exports - Store
pub use store::{Document, DocumentStore, InMemoryStore, StoreError, Subscription};

// Crate-level exports - Record encoding
pub use record::{MatchRecord, PLAY_FIELDS, changed_fields, decode_state, encode_state};

// Crate-level exports - Collaborators
pub use identity::{AnonymousIdentity, FixedIdentity, Identity};
pub use vocabulary::{Vocabulary, WordList, default_words};

// Crate-level exports - Synchronization and lifecycle
pub use lobby::Lobby;
pub use session::{MatchError, MatchSession, MatchView, SnapshotUpdate};

// Crate-level exports - Configuration and simulation
pub use config::{AppConfig, CONFIG_ENV, ConfigError, SimulationConfig};
pub use simulation::{AutoPlayer, RandomStrategy, SimulationReport, Strategy, drive, run_simulation};
