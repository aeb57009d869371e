//! Policy engine: combine availability and weather into one action.
//!
//! Rules, first match wins:
//!
//! | Condition              | Action               |
//! |------------------------|----------------------|
//! | calendar conflict      | `ProposeCandidates`  |
//! | high rain risk         | `AdjustTime`         |
//! | moderate rain risk     | `AdjustPlace`        |
//! | otherwise              | `Create`             |

mod adjustments;

use chrono::NaiveDateTime;
use raincheck_domain::{Adjustments, PolicyAction, PolicyDecision, RiskTier};

pub use self::adjustments::{shifted_starts, venue_hint, OUTDOOR_KEYWORDS, TIME_SHIFT_OFFSETS};

/// Decide what to do with a requested slot.
///
/// A conflict always wins over weather, whatever the risk tier.
pub fn decide(has_conflict: bool, risk: RiskTier, weather_description: &str) -> PolicyDecision {
    if has_conflict {
        return PolicyDecision {
            action: PolicyAction::ProposeCandidates,
            reason: "Calendar conflict detected at requested time".to_string(),
            notes: Some("Please select from alternative time slots".to_string()),
            adjustments: Adjustments::AlternativeSlots { candidates: Vec::new() },
        };
    }

    match risk {
        RiskTier::High => PolicyDecision {
            action: PolicyAction::AdjustTime,
            reason: "High rain probability detected at requested time".to_string(),
            notes: Some(format!(
                "{weather_description}. Consider rescheduling to avoid weather risk"
            )),
            adjustments: Adjustments::WeatherWarning {
                warning: weather_description.to_string(),
                suggested_time: None,
            },
        },
        RiskTier::Moderate => PolicyDecision {
            action: PolicyAction::AdjustPlace,
            reason: "Moderate rain probability detected".to_string(),
            notes: Some("Consider indoor venue or bring umbrella".to_string()),
            adjustments: Adjustments::IndoorVenue { indoor_suggestion: true, venue_hint: None },
        },
        RiskTier::Low => PolicyDecision {
            action: PolicyAction::Create,
            reason: "No conflicts detected, weather conditions acceptable".to_string(),
            notes: None,
            adjustments: Adjustments::None,
        },
    }
}

/// Attach the calendar's alternatives to a `ProposeCandidates` decision.
#[must_use]
pub fn with_candidates(
    mut decision: PolicyDecision,
    candidates: &[NaiveDateTime],
) -> PolicyDecision {
    if let Adjustments::AlternativeSlots { candidates: slots } = &mut decision.adjustments {
        slots.clear();
        slots.extend_from_slice(candidates);
    }
    decision
}

/// Record a weather-safe start time on an `AdjustTime` decision.
#[must_use]
pub fn with_suggested_time(
    mut decision: PolicyDecision,
    suggestion: Option<NaiveDateTime>,
) -> PolicyDecision {
    if let Adjustments::WeatherWarning { suggested_time, .. } = &mut decision.adjustments {
        *suggested_time = suggestion;
    }
    decision
}

/// Record an indoor venue hint on an `AdjustPlace` decision.
#[must_use]
pub fn with_venue_hint(mut decision: PolicyDecision, hint: Option<String>) -> PolicyDecision {
    if let Adjustments::IndoorVenue { venue_hint, .. } = &mut decision.adjustments {
        *venue_hint = hint;
    }
    decision
}
