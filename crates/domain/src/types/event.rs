//! Calendar events created by the workflow.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request to book a slot on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub city: String,
    pub start: NaiveDateTime,
    pub duration_minutes: u32,
    pub attendees: Vec<String>,
    pub notes: Option<String>,
}

/// A booked event as reported by the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub event_id: String,
    pub city: String,
    pub start: NaiveDateTime,
    pub duration_minutes: u32,
    pub attendees: Vec<String>,
    #[serde(default = "default_event_status")]
    pub status: String,
    pub notes: Option<String>,
}

fn default_event_status() -> String {
    "confirmed".to_string()
}

impl CalendarEvent {
    /// Materialize a booking request under the given id.
    pub fn from_request(event_id: impl Into<String>, request: NewEvent) -> Self {
        Self {
            event_id: event_id.into(),
            city: request.city,
            start: request.start,
            duration_minutes: request.duration_minutes,
            attendees: request.attendees,
            status: default_event_status(),
            notes: request.notes,
        }
    }
}
