//! Field rules for new events.

use chrono::{DateTime, Utc};
use eventide_core::EventInput;

const MIN_TITLE_CHARS: usize = 3;

/// Every rule `input` violates, in a fixed order.
///
/// The start may be any time today or later, measured against midnight UTC
/// of `now`. An empty list means the input is valid.
#[must_use]
pub fn validate_event(input: &EventInput, now: DateTime<Utc>) -> Vec<String> {
    let mut errors = Vec::new();

    if input.title.trim().is_empty() {
        errors.push("Title is required".to_owned());
    }
    if input.title.chars().count() < MIN_TITLE_CHARS {
        errors.push(format!(
            "Title must be at least {MIN_TITLE_CHARS} characters long"
        ));
    }
    if input.location.trim().is_empty() {
        errors.push("Location is required".to_owned());
    }

    let today = now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();
    if input.start < today {
        errors.push("Start date cannot be in the past".to_owned());
    }
    if input.end <= input.start {
        errors.push("End must be after Start".to_owned());
    }
    if input.owner_id.is_nil() {
        errors.push("OwnerId is required".to_owned());
    }
    if input.category_id.is_nil() {
        errors.push("CategoryId is required".to_owned());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use eventide_core::{CategoryId, UserId};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 15, 14, 30, 0).unwrap()
    }

    fn valid() -> EventInput {
        let start = now() + Duration::days(1);
        EventInput {
            title: "Planning".to_owned(),
            location: "Room 1".to_owned(),
            start,
            end: start + Duration::hours(1),
            owner_id: UserId::generate(),
            category_id: CategoryId::generate(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_event(&valid(), now()).is_empty());
    }

    #[test]
    fn test_earlier_today_is_allowed() {
        let start = Utc.with_ymd_and_hms(2030, 6, 15, 0, 0, 0).unwrap();
        let input = EventInput {
            start,
            end: start + Duration::hours(1),
            ..valid()
        };
        assert!(validate_event(&input, now()).is_empty());
    }

    #[test]
    fn test_yesterday_rejected() {
        let start = now() - Duration::days(1);
        let input = EventInput {
            start,
            end: start + Duration::hours(1),
            ..valid()
        };
        assert_eq!(
            validate_event(&input, now()),
            ["Start date cannot be in the past"]
        );
    }

    #[test]
    fn test_end_must_follow_start() {
        let mut input = valid();
        input.end = input.start;
        assert_eq!(validate_event(&input, now()), ["End must be after Start"]);

        input.end = input.start - Duration::minutes(1);
        assert_eq!(validate_event(&input, now()), ["End must be after Start"]);
    }

    #[test]
    fn test_short_title() {
        let input = EventInput {
            title: "ab".to_owned(),
            ..valid()
        };
        assert_eq!(
            validate_event(&input, now()),
            ["Title must be at least 3 characters long"]
        );
    }

    #[test]
    fn test_empty_input_reports_everything() {
        let errors = validate_event(&EventInput::default(), now());
        assert_eq!(
            errors,
            [
                "Title is required",
                "Title must be at least 3 characters long",
                "Location is required",
                "Start date cannot be in the past",
                "End must be after Start",
                "OwnerId is required",
                "CategoryId is required",
            ]
        );
    }
}
