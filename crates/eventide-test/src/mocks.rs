//! Mock implementations for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eventide_core::{Event, EventId, UserId};
use eventide_events::{IdentityLookup, LookupError, LookupResult};
use eventide_storage::{EventQuery, EventStore, Page, StorageError, StorageResult};

/// Scripted answer for a [`MockIdentityLookup`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The account exists.
    Found,
    /// The account does not exist.
    Missing,
    /// The remote service answered with this status.
    Status(u16),
    /// The request never reached the service.
    Unreachable,
}

/// A recorded lookup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCall {
    /// Account id looked up.
    pub user_id: UserId,
    /// Bearer token forwarded with the call.
    pub bearer_token: Option<String>,
}

/// Mock implementation of [`IdentityLookup`].
///
/// Queued outcomes are consumed first; once empty every call gets the
/// default outcome.
#[derive(Debug, Clone)]
pub struct MockIdentityLookup {
    outcomes: Arc<Mutex<VecDeque<LookupOutcome>>>,
    calls: Arc<Mutex<Vec<LookupCall>>>,
    default_outcome: LookupOutcome,
}

impl MockIdentityLookup {
    /// A lookup that confirms every account.
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            default_outcome: LookupOutcome::Found,
        }
    }

    /// A lookup that answers every call with `outcome`.
    #[must_use]
    pub fn always(outcome: LookupOutcome) -> Self {
        Self::new().with_default_outcome(outcome)
    }

    /// Set the outcome used once the queue is empty.
    #[must_use]
    pub fn with_default_outcome(mut self, outcome: LookupOutcome) -> Self {
        self.default_outcome = outcome;
        self
    }

    /// Queue an outcome for the next call.
    #[must_use]
    pub fn with_outcome(self, outcome: LookupOutcome) -> Self {
        if let Ok(mut guard) = self.outcomes.lock() {
            guard.push_back(outcome);
        }
        self
    }

    /// Every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<LookupCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Wrap in an `Arc` for injection.
    #[must_use]
    pub fn shared(&self) -> Arc<Self> {
        Arc::new(self.clone())
    }
}

impl Default for MockIdentityLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityLookup for MockIdentityLookup {
    async fn get_user_by_id(&self, id: UserId, bearer_token: Option<&str>) -> LookupResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(LookupCall {
                user_id: id,
                bearer_token: bearer_token.map(str::to_owned),
            });
        }

        let outcome = self
            .outcomes
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .unwrap_or(self.default_outcome);

        match outcome {
            LookupOutcome::Found => Ok(()),
            LookupOutcome::Missing => Err(LookupError::NotFound(id)),
            LookupOutcome::Status(status) => Err(LookupError::Status { status }),
            LookupOutcome::Unreachable => {
                Err(LookupError::Transport("connection refused".to_owned()))
            },
        }
    }
}

/// An [`EventStore`] whose every operation fails.
#[derive(Debug, Clone, Default)]
pub struct FailingEventStore {
    message: String,
}

impl FailingEventStore {
    /// Fail with `message` as the internal detail.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T>(&self) -> StorageResult<T> {
        Err(StorageError::Internal(self.message.clone()))
    }
}

#[async_trait]
impl EventStore for FailingEventStore {
    async fn find_by_id(&self, _id: EventId) -> StorageResult<Option<Event>> {
        self.fail()
    }

    async fn insert(&self, _event: Event) -> StorageResult<()> {
        self.fail()
    }

    async fn update(&self, _event: Event) -> StorageResult<()> {
        self.fail()
    }

    async fn delete(&self, _id: EventId) -> StorageResult<()> {
        self.fail()
    }

    async fn query(&self, _query: &EventQuery) -> StorageResult<Page<Event>> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_then_default() {
        let lookup = MockIdentityLookup::new()
            .with_outcome(LookupOutcome::Missing)
            .with_outcome(LookupOutcome::Status(503));
        let id = UserId::generate();

        assert!(matches!(
            lookup.get_user_by_id(id, Some("t")).await,
            Err(LookupError::NotFound(_))
        ));
        assert!(matches!(
            lookup.get_user_by_id(id, None).await,
            Err(LookupError::Status { status: 503 })
        ));
        assert!(lookup.get_user_by_id(id, None).await.is_ok());

        let calls = lookup.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].bearer_token.as_deref(), Some("t"));
        assert_eq!(calls[1].bearer_token, None);
    }

    #[tokio::test]
    async fn test_shared_handle_records_calls() {
        let lookup = MockIdentityLookup::always(LookupOutcome::Unreachable);
        let shared = lookup.shared();

        assert!(shared.get_user_by_id(UserId::generate(), None).await.is_err());
        assert_eq!(lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = FailingEventStore::new("disk on fire");
        let err = store.find_by_id(EventId::generate()).await.unwrap_err();
        assert_eq!(err.to_string(), "storage error: disk on fire");
    }
}
