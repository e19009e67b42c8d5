//! Eventide Core - Shared types for the account and event services.
//!
//! This crate provides:
//! - Strongly typed identifiers for users, events, and categories
//! - The two-variant [`Role`] used for every authorization decision
//! - Account and event records plus their caller-facing projections
//! - The [`ServiceError`] taxonomy returned by every service operation
//!
//! # Example
//!
//! ```
//! use eventide_core::{Actor, Role, UserId};
//!
//! let owner = UserId::generate();
//! let actor = Actor::new(Some(owner), "alice", Role::User);
//!
//! assert!(actor.is_owner_of(owner));
//! assert!(!actor.role.is_admin());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod account;
mod actor;
mod category;
mod error;
mod event;
mod ids;
mod mask;
mod role;

pub use account::{Account, AccountView, RoleChange};
pub use actor::Actor;
pub use category::{Category, seeded_categories};
pub use error::{ServiceError, ServiceResult, UNEXPECTED_PUBLIC_MESSAGE};
pub use event::{Event, EventInput, EventView};
pub use ids::{CategoryId, EventId, UserId};
pub use mask::mask_email;
pub use role::{ParseRoleError, Role};
