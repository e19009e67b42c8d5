//! Test fixtures for common types.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use eventide_core::{Account, CategoryId, EventInput, Role, UserId};
use eventide_crypto::PasswordCredential;

/// Password used for every fixture account.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Iteration count for fixture credentials. Low so tests stay fast.
pub const TEST_ITERATIONS: u32 = 1_000;

/// A credential encoder with a low iteration count.
#[must_use]
pub fn test_credential() -> PasswordCredential {
    PasswordCredential::with_iterations(TEST_ITERATIONS).unwrap_or_default()
}

/// An account whose password is [`TEST_PASSWORD`].
#[must_use]
pub fn test_account(name: &str, role: Role) -> Account {
    let hash = test_credential().encode(TEST_PASSWORD);
    Account::register(name, hash.to_string(), format!("{name}@example.com")).with_role(role)
}

/// `hour`:00 UTC tomorrow.
#[must_use]
pub fn tomorrow_at(hour: u32) -> DateTime<Utc> {
    let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    midnight
        .checked_add_signed(Duration::days(1))
        .and_then(|t| t.checked_add_signed(Duration::hours(i64::from(hour.min(23)))))
        .unwrap_or(midnight)
}

/// A valid one-hour event tomorrow at 10:00.
#[must_use]
pub fn test_event_input(owner: UserId, category: CategoryId) -> EventInput {
    EventInput {
        title: "Team sync".to_owned(),
        location: "Room 101".to_owned(),
        start: tomorrow_at(10),
        end: tomorrow_at(11),
        owner_id: owner,
        category_id: category,
    }
}

/// A valid event at `location`, starting tomorrow at `hour`.
#[must_use]
pub fn test_event_at(
    owner: UserId,
    category: CategoryId,
    location: &str,
    hour: u32,
) -> EventInput {
    let start = tomorrow_at(hour);
    EventInput {
        title: format!("Meeting at {location}"),
        location: location.to_owned(),
        start,
        end: start.checked_add_signed(Duration::hours(1)).unwrap_or(start),
        owner_id: owner,
        category_id: category,
    }
}
