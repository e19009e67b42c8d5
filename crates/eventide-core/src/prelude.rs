//! Prelude module - commonly used types for convenient import.
//!
//! Use `use eventide_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{ServiceError, ServiceResult};

// Identifiers and roles
pub use crate::{CategoryId, EventId, Role, UserId};

// Records
pub use crate::{Account, AccountView, Actor, Category, Event, EventInput, EventView};
