//! First-class invariants for quiz-gated Connect Four.
//!
//! Invariants are logical properties of a [`MatchState`] that must hold after
//! every successful transition. They are checked as contract postconditions
//! and when decoding snapshots received from the store.

use super::MatchState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod answer_gate;
pub mod gravity;
pub mod terminal;
pub mod turn_owner;

pub use answer_gate::AnswerGateInvariant;
pub use gravity::GravityInvariant;
pub use terminal::TerminalInvariant;
pub use turn_owner::TurnOwnerInvariant;

/// All match invariants as a composable set.
pub type MatchInvariants = (
    GravityInvariant,
    TurnOwnerInvariant,
    AnswerGateInvariant,
    TerminalInvariant,
);

/// Checks every match invariant and joins the violations into one message.
pub fn describe_violations(state: &MatchState) -> Result<(), String> {
    MatchInvariants::check_all(state).map_err(|violations| {
        violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    })
}
