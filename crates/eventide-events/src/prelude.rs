//! Prelude module - commonly used types for convenient import.
//!
//! Use `use eventide_events::prelude::*;` to import all essential types.

pub use crate::{EventService, Paging, SearchRequest, SearchResults};
pub use crate::{IdentityLookup, LookupError, LookupResult};
