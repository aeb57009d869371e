//! Calendar availability for a requested slot.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_CANDIDATES;
use crate::errors::{RaincheckError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Conflict,
}

crate::impl_domain_status_conversions!(AvailabilityStatus {
    Available => "available",
    Conflict => "conflict",
});

/// An existing commitment that blocks part of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub event_id: String,
    pub start: NaiveDateTime,
    pub duration_minutes: u32,
}

impl BusyInterval {
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Answer from a calendar oracle.
///
/// A conflict always carries between one and three alternative start times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResult {
    status: AvailabilityStatus,
    conflict: Option<BusyInterval>,
    candidates: Vec<NaiveDateTime>,
}

impl AvailabilityResult {
    pub const fn available() -> Self {
        Self { status: AvailabilityStatus::Available, conflict: None, candidates: Vec::new() }
    }

    /// Build a conflict result. Candidates beyond the third are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RaincheckError::InvalidInput`] when no candidates are given.
    pub fn conflict(busy: BusyInterval, mut candidates: Vec<NaiveDateTime>) -> Result<Self> {
        if candidates.is_empty() {
            return Err(RaincheckError::InvalidInput(
                "a conflict must offer at least one alternative time".to_string(),
            ));
        }
        candidates.truncate(MAX_CANDIDATES);
        Ok(Self { status: AvailabilityStatus::Conflict, conflict: Some(busy), candidates })
    }

    pub const fn status(&self) -> AvailabilityStatus {
        self.status
    }

    pub fn has_conflict(&self) -> bool {
        self.status == AvailabilityStatus::Conflict
    }

    /// The busy interval that caused the conflict, if any.
    pub const fn conflicting(&self) -> Option<&BusyInterval> {
        self.conflict.as_ref()
    }

    pub fn candidates(&self) -> &[NaiveDateTime] {
        &self.candidates
    }

    /// First alternative start when the requested slot is taken.
    pub fn next_available(&self) -> Option<NaiveDateTime> {
        self.candidates.first().copied()
    }
}
