//! Eventide Events - Lifecycle of owned events.
//!
//! [`EventService`] runs every operation through the same stages:
//!
//! - **create**: validate every field, confirm the owner through an
//!   [`IdentityLookup`], check the category, persist, project
//! - **get / update / delete**: load (or `NotFound`), authorize owner or
//!   admin (or `Forbidden`), then read, overwrite, or remove
//! - **search**: force the owner filter for non-admins, filter, sort by
//!   start, paginate
//!
//! Validation collects every violation instead of stopping at the first.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod lookup;
mod search;
mod service;
mod validate;

pub use error::{LookupError, LookupResult};
pub use lookup::{DirectoryLookup, HttpIdentityLookup, IdentityLookup};
pub use search::{Paging, SearchRequest, SearchResults};
pub use service::{EventService, NO_MATCHING_RECORD, OWNER_NOT_CONFIRMED};
pub use validate::validate_event;
