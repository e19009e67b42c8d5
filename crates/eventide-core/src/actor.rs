//! The caller identity decoded from a bearer token.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::role::Role;

/// Identity and role of the caller performing an operation.
///
/// `user_id` is `None` when the token subject was not a valid identifier;
/// such an actor never matches an owner.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Subject of the presented token.
    pub user_id: Option<UserId>,
    /// Login name asserted by the token.
    pub name: String,
    /// Role asserted by the token.
    pub role: Role,
    /// The raw token the actor presented, forwarded to peer services.
    #[serde(skip)]
    pub bearer_token: Option<String>,
}

impl Actor {
    /// Create an actor without a forwardable token.
    #[must_use]
    pub fn new(user_id: Option<UserId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            name: name.into(),
            role,
            bearer_token: None,
        }
    }

    /// Attach the raw bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Whether this actor is the given owner.
    #[must_use]
    pub fn is_owner_of(&self, owner_id: UserId) -> bool {
        self.user_id == Some(owner_id)
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owner_of() {
        let id = UserId::generate();
        let actor = Actor::new(Some(id), "bob", Role::User);
        assert!(actor.is_owner_of(id));
        assert!(!actor.is_owner_of(UserId::generate()));
    }

    #[test]
    fn test_actor_without_subject_owns_nothing() {
        let actor = Actor::new(None, "ghost", Role::User);
        assert!(!actor.is_owner_of(UserId::nil()));
        assert!(!actor.is_owner_of(UserId::generate()));
    }

    #[test]
    fn test_debug_redacts_token() {
        let actor = Actor::new(None, "bob", Role::User).with_bearer_token("eyJ.secret.sig");
        let debug = format!("{actor:?}");
        assert!(!debug.contains("eyJ.secret.sig"));
        assert!(debug.contains("<redacted>"));
    }
}
