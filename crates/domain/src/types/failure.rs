//! Failure records produced by workflow stages.
//!
//! Failures are data, not panics: every stage records what went wrong and the
//! recovery stage decides whether to ask the user, degrade, or stop.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A piece of the request the user still has to supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingField {
    Time,
    Location,
    Duration,
}

crate::impl_domain_status_conversions!(MissingField {
    Time => "time",
    Location => "location",
    Duration => "duration",
});

/// The request text could not be turned into a slot.
///
/// Every problem found is reported, along with whatever the parser did manage
/// to extract so a follow-up request can reuse it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", .messages.join("; "))]
pub struct ParseFailure {
    pub missing: Vec<MissingField>,
    pub messages: Vec<String>,
    pub attendees: Vec<String>,
    pub description: Option<String>,
}

impl ParseFailure {
    /// Record another missing field, keeping `missing` free of duplicates.
    pub fn push(&mut self, field: MissingField, message: impl Into<String>) {
        if !self.missing.contains(&field) {
            self.missing.push(field);
        }
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A single business-rule violation on an otherwise well-formed slot.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SlotViolation {
    #[error("City cannot be empty. Please provide a location.")]
    EmptyCity,

    #[error(
        "Cannot schedule in the past. Requested time: {}, Current time: {}",
        .requested.format("%Y-%m-%d %H:%M"),
        .now.format("%Y-%m-%d %H:%M")
    )]
    InPast { requested: NaiveDateTime, now: NaiveDateTime },

    #[error(
        "Duration must be between 5 and 480 minutes (5 min to 8 hours). Provided: {minutes} \
         minutes"
    )]
    DurationOutOfRange { minutes: u32 },
}

impl SlotViolation {
    /// The field the user has to restate to fix this violation.
    pub const fn missing_field(&self) -> MissingField {
        match self {
            Self::EmptyCity => MissingField::Location,
            Self::InPast { .. } => MissingField::Time,
            Self::DurationOutOfRange { .. } => MissingField::Duration,
        }
    }
}

/// All violations found on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub violations: Vec<SlotViolation>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl ValidationFailure {
    pub fn missing(&self) -> Vec<MissingField> {
        let mut fields = Vec::new();
        for field in self.violations.iter().map(SlotViolation::missing_field) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }
}

/// External capability consulted by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Weather,
    Calendar,
}

crate::impl_domain_status_conversions!(Capability {
    Weather => "weather",
    Calendar => "calendar",
});

/// What kind of failure the workflow is recovering from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Parse,
    Validation,
    Weather,
    Calendar,
    RetryExhausted,
}

crate::impl_domain_status_conversions!(FailureKind {
    Parse => "parse",
    Validation => "validation",
    Weather => "weather",
    Calendar => "calendar",
    RetryExhausted => "retry_exhausted",
});

impl FailureKind {
    /// Failures the user can fix by rephrasing.
    pub const fn needs_clarification(self) -> bool {
        matches!(self, Self::Parse | Self::Validation)
    }

    pub const fn capability(self) -> Option<Capability> {
        match self {
            Self::Weather => Some(Capability::Weather),
            Self::Calendar => Some(Capability::Calendar),
            _ => None,
        }
    }
}

/// Failure recorded on the workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowFailure {
    pub kind: FailureKind,
    pub message: String,
    pub missing: Vec<MissingField>,
}

impl WorkflowFailure {
    pub fn service(capability: Capability, message: impl Into<String>) -> Self {
        let kind = match capability {
            Capability::Weather => FailureKind::Weather,
            Capability::Calendar => FailureKind::Calendar,
        };
        Self { kind, message: message.into(), missing: Vec::new() }
    }

    pub fn retry_exhausted(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::RetryExhausted, message: message.into(), missing: Vec::new() }
    }
}

impl From<&ParseFailure> for WorkflowFailure {
    fn from(failure: &ParseFailure) -> Self {
        Self {
            kind: FailureKind::Parse,
            message: failure.to_string(),
            missing: failure.missing.clone(),
        }
    }
}

impl From<&ValidationFailure> for WorkflowFailure {
    fn from(failure: &ValidationFailure) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: failure.to_string(),
            missing: failure.missing(),
        }
    }
}
