//! Business-rule checks on a parsed slot.

use chrono::NaiveDateTime;
use raincheck_domain::constants::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use raincheck_domain::{Slot, SlotViolation, ValidationFailure};

/// Validate a slot against "now" at validation time.
///
/// Every violated rule is reported, not just the first.
///
/// # Errors
/// Returns [`ValidationFailure`] listing each [`SlotViolation`] found.
pub fn validate_slot(slot: &Slot, now: NaiveDateTime) -> Result<(), ValidationFailure> {
    let mut violations = Vec::new();

    if slot.city.trim().is_empty() {
        violations.push(SlotViolation::EmptyCity);
    }
    if slot.start <= now {
        violations.push(SlotViolation::InPast { requested: slot.start, now });
    }
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&slot.duration_minutes) {
        violations.push(SlotViolation::DurationOutOfRange { minutes: slot.duration_minutes });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { violations })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 17).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn slot(city: &str, start: NaiveDateTime, minutes: u32) -> Slot {
        Slot {
            city: city.to_string(),
            start,
            duration_minutes: minutes,
            attendees: vec!["Alice".to_string()],
            description: None,
        }
    }

    #[test]
    fn accepts_future_slot_within_limits() {
        assert!(validate_slot(&slot("Taipei", at(10, 1), 5), at(10, 0)).is_ok());
        assert!(validate_slot(&slot("Taipei", at(11, 0), 480), at(10, 0)).is_ok());
    }

    #[test]
    fn start_equal_to_now_is_in_the_past() {
        let failure = validate_slot(&slot("Taipei", at(10, 0), 60), at(10, 0)).unwrap_err();
        assert_eq!(
            failure.violations,
            vec![SlotViolation::InPast { requested: at(10, 0), now: at(10, 0) }]
        );
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        let short = validate_slot(&slot("Taipei", at(12, 0), 4), at(10, 0)).unwrap_err();
        assert_eq!(short.violations, vec![SlotViolation::DurationOutOfRange { minutes: 4 }]);

        let long = validate_slot(&slot("Taipei", at(12, 0), 481), at(10, 0)).unwrap_err();
        assert!(long.to_string().contains("Provided: 481 minutes"));
    }

    #[test]
    fn reports_every_violation() {
        let failure = validate_slot(&slot("  ", at(9, 0), 600), at(10, 0)).unwrap_err();

        assert_eq!(failure.violations.len(), 3);
        assert!(failure.to_string().starts_with("City cannot be empty."));
    }
}
