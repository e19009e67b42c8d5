//! Role changes, account lookup, and directory seeding.

use std::sync::Arc;

use eventide_core::{
    Account, AccountView, Actor, Role, RoleChange, ServiceError, ServiceResult, UserId,
};
use eventide_storage::AccountDirectory;

use crate::policy::AccessPolicy;

const USER_NOT_FOUND: &str = "User not found";

/// Administrative operations on stored accounts.
pub struct AccountService {
    directory: Arc<dyn AccountDirectory>,
}

impl AccountService {
    /// Create the service over an account directory.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    /// Replace the role of the named account. Admin only.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Forbidden`] if `actor` is not an admin
    /// - [`ServiceError::Validation`] if `role` is not `Admin` or `User`
    /// - [`ServiceError::NotFound`] if no account has that name
    pub async fn set_role(&self, actor: &Actor, name: &str, role: &str) -> ServiceResult<RoleChange> {
        AccessPolicy::require_admin(actor)?;
        tracing::info!(user_name = %name, role = %role, "changing role");

        let new_role: Role = role.parse().map_err(|_| {
            tracing::warn!(role = %role, "rejected unknown role");
            ServiceError::validation(["Role must be Admin or User"])
        })?;

        let Some(account) = self.directory.find_by_name(name).await? else {
            tracing::warn!(user_name = %name, "user not found during role change");
            return Err(ServiceError::NotFound(USER_NOT_FOUND.to_owned()));
        };

        let account = account.with_role(new_role);
        let change = RoleChange {
            name: account.name.clone(),
            new_role,
        };
        self.directory.update(account).await?;
        Ok(change)
    }

    /// Caller-facing projection of an account.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the id is unknown.
    pub async fn get_identity_by_id(&self, id: UserId) -> ServiceResult<AccountView> {
        match self.directory.find_by_id(id).await? {
            Some(account) => Ok(account.view()),
            None => {
                tracing::warn!(user_id = %id, "user not found during lookup");
                Err(ServiceError::NotFound(USER_NOT_FOUND.to_owned()))
            },
        }
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

/// Store the seed accounts if the directory is still empty.
///
/// Returns the number of accounts written (zero when already populated).
///
/// # Errors
///
/// Returns [`ServiceError::Unexpected`] if storage fails.
pub async fn seed_directory(
    directory: &dyn AccountDirectory,
    accounts: impl IntoIterator<Item = Account>,
) -> ServiceResult<usize> {
    if directory.count().await? > 0 {
        tracing::debug!("account directory already populated, skipping seed");
        return Ok(0);
    }

    let mut written = 0usize;
    for account in accounts {
        tracing::debug!(user_name = %account.name, role = %account.role, "seeding account");
        directory.save(account).await?;
        written = written.saturating_add(1);
    }
    tracing::info!(count = written, "seeded account directory");
    Ok(written)
}
