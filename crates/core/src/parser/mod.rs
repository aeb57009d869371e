//! Natural-language slot parser.
//!
//! Extraction is rule-based and deterministic. The orchestrator only depends
//! on the [`SlotExtractor`] trait, so a different strategy (for example a
//! model-backed one) can be swapped in without touching the workflow.
//!
//! All problems are collected before reporting: a request missing both the
//! city and the time produces one [`ParseFailure`] naming both, so the user
//! is asked once for everything.

mod datetime;
mod entities;

use chrono::NaiveDateTime;
use raincheck_domain::constants::{DEFAULT_DURATION_MINUTES, UNKNOWN_ATTENDEE};
use raincheck_domain::{MissingField, ParseFailure, Slot};
use tracing::debug;

use self::datetime::DateTimeIssue;

/// Turns request text into a [`Slot`] or reports what is missing.
pub trait SlotExtractor: Send + Sync {
    /// `now` anchors relative expressions such as "tomorrow" or "Friday".
    fn extract(&self, text: &str, now: NaiveDateTime) -> Result<Slot, ParseFailure>;
}

/// Keyword and pattern based extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedParser;

impl SlotExtractor for RuleBasedParser {
    fn extract(&self, text: &str, now: NaiveDateTime) -> Result<Slot, ParseFailure> {
        parse_slot(text, now)
    }
}

/// Parse free text into a slot.
///
/// City and a temporal cue are mandatory. Duration defaults to 60 minutes and
/// attendees to `["Unknown"]`.
pub fn parse_slot(text: &str, now: NaiveDateTime) -> Result<Slot, ParseFailure> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseFailure {
            missing: vec![MissingField::Time, MissingField::Location],
            messages: vec!["Input cannot be empty".to_string()],
            ..ParseFailure::default()
        });
    }

    let attendees = entities::extract_attendees(text);
    let description = entities::describe(text);
    let city = entities::extract_city(text, &attendees);
    // Spans must index the lowercased text the datetime resolver reads;
    // lowercasing can change byte lengths.
    let duration = entities::extract_duration(&text.to_lowercase());

    let masked: Vec<_> = duration.iter().map(|found| found.span.clone()).collect();
    let start = datetime::resolve_start(text, now, &masked);

    let mut failure = ParseFailure::default();
    if city.is_none() {
        failure.push(MissingField::Location, "City not found in input");
    }
    match &start {
        Ok(_) => {}
        Err(DateTimeIssue::NoTemporalCue) => failure.push(
            MissingField::Time,
            "Time not specified. Include a day or a time of day",
        ),
        Err(DateTimeIssue::InvalidDate(message) | DateTimeIssue::InvalidTime(message)) => {
            failure.push(MissingField::Time, message.clone());
        }
    }

    match (city, start) {
        (Some(city), Ok(start)) if failure.is_empty() => {
            let slot = Slot {
                city,
                start,
                duration_minutes: duration
                    .map_or(DEFAULT_DURATION_MINUTES, |found| found.minutes),
                attendees,
                description: Some(description),
            };
            debug!(
                city = %slot.city,
                start = %slot.start,
                duration_minutes = slot.duration_minutes,
                "parsed slot"
            );
            Ok(slot)
        }
        _ => {
            debug!(missing = ?failure.missing, "request is incomplete");
            failure.attendees =
                attendees.into_iter().filter(|name| name != UNKNOWN_ATTENDEE).collect();
            failure.description = Some(description);
            Err(failure)
        }
    }
}
