//! Account records and their projections.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::role::Role;

/// A stored account (the identity behind a bearer token).
///
/// `password_hash` holds an encoded credential, never the plaintext secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, generated at registration.
    pub id: UserId,
    /// Unique login name.
    pub name: String,
    /// Encoded salted credential.
    pub password_hash: String,
    /// Capability level; `User` unless changed by an administrator.
    pub role: Role,
    /// Contact e-mail address.
    pub email: String,
}

impl Account {
    /// Create a freshly registered account with a new id and the `User` role.
    #[must_use]
    pub fn register(
        name: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            password_hash: password_hash.into(),
            role: Role::User,
            email: email.into(),
        }
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Caller-facing projection (never includes the credential).
    #[must_use]
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("email", &crate::mask::mask_email(&self.email))
            .finish_non_exhaustive()
    }
}

/// Public projection of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    /// Account identifier.
    pub id: UserId,
    /// Login name.
    pub name: String,
    /// Contact e-mail address.
    pub email: String,
}

/// Result of a role change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleChange {
    /// Login name of the changed account.
    pub name: String,
    /// The role now stored for the account.
    pub new_role: Role,
}
