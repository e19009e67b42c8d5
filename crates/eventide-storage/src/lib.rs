//! Eventide Storage - repository contracts and in-memory backings.
//!
//! Every store is expressed as an async trait so the volatile in-memory
//! implementations here can be swapped for a durable backend without
//! touching the authentication or event services.
//!
//! - [`AccountDirectory`] - accounts by name or id
//! - [`EventStore`] - events with filtered, paginated queries
//! - [`CategoryCatalog`] - the fixed set of event categories
//!
//! Each in-memory store guards its collection with a single
//! `std::sync::RwLock`, so every trait method is atomic.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod accounts;
pub mod categories;
pub mod error;
pub mod events;

pub use accounts::{AccountDirectory, InMemoryAccountDirectory};
pub use categories::{CategoryCatalog, InMemoryCategoryCatalog};
pub use error::{StorageError, StorageResult};
pub use events::{EventQuery, EventStore, InMemoryEventStore, Page};
