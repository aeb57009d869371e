//! The structured scheduling intent extracted from a request.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A requested meeting slot.
///
/// `start` is wall-clock time in the scheduler's configured timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub city: String,
    pub start: NaiveDateTime,
    pub duration_minutes: u32,
    pub attendees: Vec<String>,
    pub description: Option<String>,
}

impl Slot {
    /// Exclusive end of the slot.
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Whether `[start, end)` overlaps another half-open interval.
    pub fn overlaps(&self, other_start: NaiveDateTime, other_end: NaiveDateTime) -> bool {
        self.start < other_end && other_start < self.end()
    }
}
