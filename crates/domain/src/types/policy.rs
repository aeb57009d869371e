//! Policy decisions combining availability and weather.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    /// Book the requested slot as-is
    Create,
    /// Move the meeting to avoid heavy rain
    AdjustTime,
    /// Keep the time, suggest an indoor venue
    AdjustPlace,
    /// Requested slot is taken; offer alternatives
    ProposeCandidates,
}

crate::impl_domain_status_conversions!(PolicyAction {
    Create => "create",
    AdjustTime => "adjust_time",
    AdjustPlace => "adjust_place",
    ProposeCandidates => "propose_candidates",
});

/// Action-specific payload attached to a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustments {
    None,
    AlternativeSlots {
        candidates: Vec<NaiveDateTime>,
    },
    WeatherWarning {
        warning: String,
        suggested_time: Option<NaiveDateTime>,
    },
    IndoorVenue {
        indoor_suggestion: bool,
        venue_hint: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub action: PolicyAction,
    pub reason: String,
    pub notes: Option<String>,
    pub adjustments: Adjustments,
}

impl PolicyDecision {
    /// Alternatives offered to the user, empty unless proposing candidates.
    pub fn candidates(&self) -> &[NaiveDateTime] {
        match &self.adjustments {
            Adjustments::AlternativeSlots { candidates } => candidates,
            _ => &[],
        }
    }

    /// Weather-safe start time, if one was found for a time adjustment.
    pub const fn suggested_time(&self) -> Option<NaiveDateTime> {
        match &self.adjustments {
            Adjustments::WeatherWarning { suggested_time, .. } => *suggested_time,
            _ => None,
        }
    }

    pub fn venue_hint(&self) -> Option<&str> {
        match &self.adjustments {
            Adjustments::IndoorVenue { venue_hint, .. } => venue_hint.as_deref(),
            _ => None,
        }
    }
}
