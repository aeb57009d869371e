//! Helpers that enrich adjustment decisions.

use chrono::{Duration, NaiveDateTime};

/// Offsets tried, in order, when looking for a drier start time.
pub const TIME_SHIFT_OFFSETS: [i64; 4] = [120, -120, 60, -60];

pub const OUTDOOR_KEYWORDS: [&str; 7] =
    ["park", "beach", "outdoor", "garden", "terrace", "patio", "plaza"];

/// Shifted start times worth checking, skipping any that are not after `now`.
pub fn shifted_starts(start: NaiveDateTime, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    TIME_SHIFT_OFFSETS
        .iter()
        .map(|offset| start + Duration::minutes(*offset))
        .filter(|candidate| *candidate > now)
        .collect()
}

/// Indoor suggestion for requests that mention an outdoor setting.
pub fn venue_hint(city: &str, request_text: &str) -> Option<String> {
    let lower = request_text.to_lowercase();
    let outdoor = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| OUTDOOR_KEYWORDS.contains(&word));

    outdoor.then(|| {
        format!("Consider indoor venue options in {city} (cafe, restaurant, indoor space)")
    })
}
