//! Player identity.

use crate::games::quiz_four::PlayerId;
use tracing::info;

/// Issues the local player's identifier.
pub trait Identity: Send + Sync {
    /// Stable id for the lifetime of this session.
    fn current_player_id(&self) -> PlayerId;
}

/// Random anonymous id generated once per session.
#[derive(Debug, Clone)]
pub struct AnonymousIdentity {
    id: PlayerId,
}

impl AnonymousIdentity {
    /// Signs in anonymously.
    pub fn new() -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        info!(player_id = %id, "Anonymous identity issued");
        Self { id }
    }
}

impl Default for AnonymousIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl Identity for AnonymousIdentity {
    fn current_player_id(&self) -> PlayerId {
        self.id.clone()
    }
}

/// A caller-chosen id.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct FixedIdentity {
    #[new(into)]
    id: PlayerId,
}

impl Identity for FixedIdentity {
    fn current_player_id(&self) -> PlayerId {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_id_is_stable() {
        let identity = AnonymousIdentity::new();
        assert_eq!(identity.current_player_id(), identity.current_player_id());
        assert_ne!(identity.current_player_id(), AnonymousIdentity::new().current_player_id());
    }

    #[test]
    fn test_fixed_identity() {
        assert_eq!(FixedIdentity::new("A").current_player_id(), "A");
    }
}
