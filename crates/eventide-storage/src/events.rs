//! Event store and query model.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use eventide_core::{Event, EventId, UserId};

use crate::error::{StorageError, StorageResult};

/// Filters and paging for [`EventStore::query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Only events owned by this account; `None` matches every owner.
    pub owner: Option<UserId>,
    /// Only events starting at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Only events ending at or before this instant.
    pub to: Option<DateTime<Utc>>,
    /// Case-sensitive substring of the location; blank matches everything.
    pub location: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            owner: None,
            from: None,
            to: None,
            location: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl EventQuery {
    /// Query matching every event, first page of ten.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one owner.
    #[must_use]
    pub fn owned_by(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Restrict to events starting at or after `from`.
    #[must_use]
    pub fn starting_from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Restrict to events ending at or before `to`.
    #[must_use]
    pub fn ending_by(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    /// Restrict to locations containing `location`.
    #[must_use]
    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Select a page.
    #[must_use]
    pub fn paged(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Whether `event` passes every filter.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(owner) = self.owner
            && event.owner_id != owner
        {
            return false;
        }
        if let Some(from) = self.from
            && event.start < from
        {
            return false;
        }
        if let Some(to) = self.to
            && event.end > to
        {
            return false;
        }
        match self.location.as_deref() {
            Some(needle) if !needle.trim().is_empty() => event.location.contains(needle),
            _ => true,
        }
    }

    fn offset(&self) -> usize {
        let skipped_pages = self.page.saturating_sub(1);
        usize::try_from(skipped_pages.saturating_mul(self.page_size)).unwrap_or(usize::MAX)
    }

    fn limit(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Number of matching items before paging.
    pub total: usize,
}

impl<T> Page<T> {
    /// Transform every item, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Persistence of events.
#[async_trait::async_trait]
pub trait EventStore: Send + Sync {
    /// Find an event by id.
    async fn find_by_id(&self, id: EventId) -> StorageResult<Option<Event>>;

    /// Persist a new event.
    async fn insert(&self, event: Event) -> StorageResult<()>;

    /// Replace a stored event.
    async fn update(&self, event: Event) -> StorageResult<()>;

    /// Remove an event. Removing an absent id is a no-op.
    async fn delete(&self, id: EventId) -> StorageResult<()>;

    /// Filter, order by start ascending, and paginate.
    ///
    /// Events sharing a start keep their insertion order.
    async fn query(&self, query: &EventQuery) -> StorageResult<Page<Event>>;
}

/// In-memory event store. Events are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventStore {
    /// Create an empty store.
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

#[async_trait::async_trait]
impl EventStore for InMemoryEventStore {
    async fn find_by_id(&self, id: EventId) -> StorageResult<Option<Event>> {
        let events = self
            .events
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to read events: {e}")))?;
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn insert(&self, event: Event) -> StorageResult<()> {
        let mut events = self
            .events
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to write events: {e}")))?;
        if events.iter().any(|e| e.id == event.id) {
            return Err(StorageError::Conflict(format!(
                "event id already exists: {}",
                event.id
            )));
        }
        events.push(event);
        Ok(())
    }

    async fn update(&self, event: Event) -> StorageResult<()> {
        let mut events = self
            .events
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to write events: {e}")))?;
        let slot = events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or_else(|| StorageError::NotFound(format!("event {}", event.id)))?;
        *slot = event;
        Ok(())
    }

    async fn delete(&self, id: EventId) -> StorageResult<()> {
        let mut events = self
            .events
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to write events: {e}")))?;
        events.retain(|e| e.id != id);
        Ok(())
    }

    async fn query(&self, query: &EventQuery) -> StorageResult<Page<Event>> {
        let events = self
            .events
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to read events: {e}")))?;

        let mut matching: Vec<&Event> = events.iter().filter(|e| query.matches(e)).collect();
        let total = matching.len();
        // Stable sort keeps insertion order among equal starts.
        matching.sort_by_key(|e| e.start);

        let items = matching
            .into_iter()
            .skip(query.offset())
            .take(query.limit())
            .cloned()
            .collect();

        Ok(Page { items, total })
    }
}
