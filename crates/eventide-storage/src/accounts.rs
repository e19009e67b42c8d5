//! Account directory.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use eventide_core::{Account, UserId};

use crate::error::{StorageError, StorageResult};

/// Lookup and persistence of accounts by name or id.
///
/// Account names are unique across the directory.
#[async_trait::async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find an account by its login name (exact match).
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Account>>;

    /// Find an account by id.
    async fn find_by_id(&self, id: UserId) -> StorageResult<Option<Account>>;

    /// Persist a new account and return it.
    ///
    /// Fails with [`StorageError::Conflict`] if the name or id is taken.
    async fn save(&self, account: Account) -> StorageResult<Account>;

    /// Replace a stored account.
    ///
    /// Fails with [`StorageError::NotFound`] if the id is unknown.
    async fn update(&self, account: Account) -> StorageResult<()>;

    /// Number of stored accounts.
    async fn count(&self) -> StorageResult<usize>;
}

/// In-memory account directory for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashMap<UserId, Account>>,
}

impl InMemoryAccountDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an Arc for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

fn name_taken(accounts: &HashMap<UserId, Account>, name: &str, except: Option<UserId>) -> bool {
    accounts
        .values()
        .any(|a| a.name == name && Some(a.id) != except)
}

#[async_trait::async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Account>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to read accounts: {e}")))?;
        Ok(accounts.values().find(|a| a.name == name).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> StorageResult<Option<Account>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to read accounts: {e}")))?;
        Ok(accounts.get(&id).cloned())
    }

    async fn save(&self, account: Account) -> StorageResult<Account> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to write accounts: {e}")))?;

        if accounts.contains_key(&account.id) {
            return Err(StorageError::Conflict(format!(
                "account id already exists: {}",
                account.id
            )));
        }
        if name_taken(&accounts, &account.name, None) {
            return Err(StorageError::Conflict(format!(
                "account name already exists: {}",
                account.name
            )));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> StorageResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to write accounts: {e}")))?;

        if !accounts.contains_key(&account.id) {
            return Err(StorageError::NotFound(format!("account {}", account.id)));
        }
        if name_taken(&accounts, &account.name, Some(account.id)) {
            return Err(StorageError::Conflict(format!(
                "account name already exists: {}",
                account.name
            )));
        }

        accounts.insert(account.id, account);
        Ok(())
    }

    async fn count(&self) -> StorageResult<usize> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to read accounts: {e}")))?;
        Ok(accounts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventide_core::Role;

    #[tokio::test]
    async fn test_save_and_find() {
        let directory = InMemoryAccountDirectory::new();
        let account = Account::register("alice", "hash", "alice@x.com");
        let id = account.id;

        directory.save(account).await.unwrap();

        let by_name = directory.find_by_name("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, id);
        let by_id = directory.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "alice");

        assert!(directory.find_by_name("Alice").await.unwrap().is_none());
        assert!(directory.find_by_id(UserId::generate()).await.unwrap().is_none());
        assert_eq!(directory.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let directory = InMemoryAccountDirectory::new();
        directory
            .save(Account::register("alice", "h1", "a@x.com"))
            .await
            .unwrap();

        let err = directory
            .save(Account::register("alice", "h2", "b@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
        assert_eq!(directory.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let directory = InMemoryAccountDirectory::new();
        let account = directory
            .save(Account::register("bob", "hash", "bob@x.com"))
            .await
            .unwrap();

        directory
            .update(account.clone().with_role(Role::Admin))
            .await
            .unwrap();

        let stored = directory.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let directory = InMemoryAccountDirectory::new();
        let err = directory
            .update(Account::register("ghost", "hash", "g@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
