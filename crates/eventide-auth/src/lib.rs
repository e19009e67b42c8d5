//! Eventide Auth - Credential checks, bearer tokens, and authorization.
//!
//! This crate provides:
//! - [`TokenIssuer`] / [`TokenVerifier`] - HS256 bearer tokens asserting
//!   subject id, name, and role, valid for two hours by default
//! - [`AuthenticationFlow`] - name + password to token
//! - [`RegistrationService`] - new accounts with PBKDF2 credentials
//! - [`AccountService`] - role changes and account lookup
//! - [`AccessPolicy`] - owner-or-admin decisions for owned resources
//!
//! # Example
//!
//! ```
//! use eventide_auth::{AccessPolicy, Decision};
//! use eventide_core::{Actor, Role, UserId};
//!
//! let owner = UserId::generate();
//! let admin = Actor::new(Some(UserId::generate()), "admin", Role::Admin);
//! let stranger = Actor::new(Some(UserId::generate()), "bob", Role::User);
//!
//! assert_eq!(AccessPolicy::authorize(&admin, owner), Decision::Allow);
//! assert_eq!(AccessPolicy::authorize(&stranger, owner), Decision::Deny);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod accounts;
mod login;
mod policy;
mod register;
mod token;

pub use accounts::{AccountService, seed_directory};
pub use login::{AuthenticationFlow, INVALID_CREDENTIALS};
pub use policy::{AccessPolicy, Decision, FORBIDDEN_MESSAGE, OwnerScope};
pub use register::{RegisterRequest, RegistrationService};
pub use token::{
    Claims, DEFAULT_TOKEN_TTL_MINUTES, INVALID_TOKEN, IssuedToken, TokenIssuer, TokenVerifier,
};
