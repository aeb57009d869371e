//! User-facing outcome of a scheduling run.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::failure::MissingField;
use super::request::CarriedFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Confirmed,
    Adjusted,
    Conflict,
    NeedsClarification,
    Error,
}

crate::impl_domain_status_conversions!(EventStatus {
    Confirmed => "confirmed",
    Adjusted => "adjusted",
    Conflict => "conflict",
    NeedsClarification => "needs_clarification",
    Error => "error",
});

/// Prompt asking the user for the fields that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationRequest {
    pub missing: Vec<MissingField>,
    pub message: String,
    pub example: String,
    /// Clarification count to send back with the follow-up request.
    pub attempt: u32,
    #[serde(default)]
    pub carried: CarriedFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub status: EventStatus,
    #[serde(rename = "summary_text")]
    pub summary: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<NaiveDateTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification: Option<ClarificationRequest>,
}

impl EventSummary {
    pub fn new(status: EventStatus, summary: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            status,
            summary: summary.into(),
            reason: reason.into(),
            notes: None,
            alternatives: None,
            event_id: None,
            suggested_time: None,
            clarification: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    #[must_use]
    pub fn with_alternatives(mut self, alternatives: Vec<NaiveDateTime>) -> Self {
        self.alternatives = Some(alternatives);
        self
    }

    #[must_use]
    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    #[must_use]
    pub const fn with_suggested_time(mut self, suggested_time: Option<NaiveDateTime>) -> Self {
        self.suggested_time = suggested_time;
        self
    }

    #[must_use]
    pub fn with_clarification(mut self, clarification: ClarificationRequest) -> Self {
        self.clarification = Some(clarification);
        self
    }
}
