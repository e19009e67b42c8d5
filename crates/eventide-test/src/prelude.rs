//! Prelude module - commonly used test helpers.
//!
//! Use `use eventide_test::prelude::*;` to import all essential helpers.

pub use crate::{
    FailingEventStore, LookupOutcome, MockIdentityLookup, TEST_PASSWORD, TestPlatform,
    init_test_logging, test_account, test_credential, test_event_at, test_event_input, tomorrow_at,
};
