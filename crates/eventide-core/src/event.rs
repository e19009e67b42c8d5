//! Scheduled events (the owned resource).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, EventId, UserId};

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Short title.
    pub title: String,
    /// Free-form location.
    pub location: String,
    /// Start instant.
    pub start: DateTime<Utc>,
    /// End instant.
    pub end: DateTime<Utc>,
    /// Owning account.
    pub owner_id: UserId,
    /// Category the event belongs to.
    pub category_id: CategoryId,
}

impl Event {
    /// Build a new event with a fresh id from caller input.
    #[must_use]
    pub fn from_input(input: EventInput) -> Self {
        Self {
            id: EventId::generate(),
            title: input.title,
            location: input.location,
            start: input.start,
            end: input.end,
            owner_id: input.owner_id,
            category_id: input.category_id,
        }
    }

    /// Replace every mutable field with the input.
    ///
    /// Fields missing from the caller's payload arrive here as their empty
    /// defaults and overwrite the stored values.
    pub fn overwrite(&mut self, input: EventInput) {
        self.title = input.title;
        self.location = input.location;
        self.start = input.start;
        self.end = input.end;
        self.owner_id = input.owner_id;
        self.category_id = input.category_id;
    }

    /// Caller-facing projection.
    #[must_use]
    pub fn view(&self) -> EventView {
        EventView {
            id: self.id,
            title: self.title.clone(),
            location: self.location.clone(),
            start: self.start,
            end: self.end,
            owner_id: self.owner_id,
            category_id: self.category_id,
        }
    }
}

/// Caller input for creating or overwriting an event.
///
/// Every field defaults to its empty value when absent from the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInput {
    /// Short title (at least 3 characters).
    pub title: String,
    /// Free-form location.
    pub location: String,
    /// Start instant (not before today, UTC).
    pub start: DateTime<Utc>,
    /// End instant (strictly after start).
    pub end: DateTime<Utc>,
    /// Owning account.
    pub owner_id: UserId,
    /// Category the event belongs to.
    pub category_id: CategoryId,
}

/// Public projection of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    /// Unique identifier.
    pub id: EventId,
    /// Short title.
    pub title: String,
    /// Free-form location.
    pub location: String,
    /// Start instant.
    pub start: DateTime<Utc>,
    /// End instant.
    pub end: DateTime<Utc>,
    /// Owning account.
    pub owner_id: UserId,
    /// Category the event belongs to.
    pub category_id: CategoryId,
}
