//! Ownership and role based authorization.

use eventide_core::{Actor, Role, ServiceError, ServiceResult, UserId};

/// Message carried by every denial.
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to access this resource";

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The actor may act on the resource.
    Allow,
    /// The actor may not act on the resource.
    Deny,
}

impl Decision {
    /// Whether the decision allows the operation.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Which owners a list query may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// Every owner's resources.
    All,
    /// Only this owner's resources.
    Owner(UserId),
    /// Nothing; the actor has no usable id.
    Nothing,
}

/// Owner-or-admin access rules for owned resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Admins may act on anything; everyone else only on what they own.
    #[must_use]
    pub fn authorize(actor: &Actor, resource_owner: UserId) -> Decision {
        match actor.role {
            Role::Admin => Decision::Allow,
            Role::User if actor.is_owner_of(resource_owner) => Decision::Allow,
            Role::User => Decision::Deny,
        }
    }

    /// Like [`Self::authorize`], failing with `Forbidden` on denial.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] if the actor may not act on the resource.
    pub fn ensure(actor: &Actor, resource_owner: UserId) -> ServiceResult<()> {
        match Self::authorize(actor, resource_owner) {
            Decision::Allow => Ok(()),
            Decision::Deny => {
                tracing::warn!(
                    actor = %actor,
                    owner_id = %resource_owner,
                    "denied access to resource"
                );
                Err(ServiceError::Forbidden(FORBIDDEN_MESSAGE.to_owned()))
            },
        }
    }

    /// Owner filter to force onto list queries before they run.
    #[must_use]
    pub fn owner_scope(actor: &Actor) -> OwnerScope {
        match (actor.role, actor.user_id) {
            (Role::Admin, _) => OwnerScope::All,
            (Role::User, Some(id)) => OwnerScope::Owner(id),
            (Role::User, None) => OwnerScope::Nothing,
        }
    }

    /// Fail unless the actor is an admin.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for non-admin actors.
    pub fn require_admin(actor: &Actor) -> ServiceResult<()> {
        if actor.role.is_admin() {
            Ok(())
        } else {
            tracing::warn!(actor = %actor, "admin role required");
            Err(ServiceError::Forbidden(FORBIDDEN_MESSAGE.to_owned()))
        }
    }
}
