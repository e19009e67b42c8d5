//! Eventide Test - Shared test utilities.
//!
//! Fixtures, mock collaborators, and a fully wired in-memory platform for
//! use as a dev-dependency.
//!
//! ```rust,ignore
//! use eventide_test::{TestPlatform, test_event_input};
//!
//! #[tokio::test]
//! async fn test_owner_sees_own_event() {
//!     let platform = TestPlatform::new();
//!     let (alice, actor) = platform.register_and_login("alice").await.unwrap();
//!
//!     let category = platform.first_category();
//!     let created = platform
//!         .events
//!         .create(&actor, test_event_input(alice.id, category))
//!         .await
//!         .unwrap();
//!     assert_eq!(created.owner_id, alice.id);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
