//! Projection of a finished [`WorkflowState`] into an [`EventSummary`].
//!
//! `finalize` reads the state and nothing else, so calling it twice on the
//! same state yields the same summary.

use raincheck_domain::{
    Capability, EventStatus, EventSummary, FailureKind, PolicyAction, PolicyDecision,
    WorkflowFailure,
};

use super::clarification::exhausted_guidance;
use super::state::{Outcome, WorkflowState};

const ERROR_SUMMARY: &str = "Failed to schedule event";

pub fn finalize(state: &WorkflowState) -> EventSummary {
    if let Some(outcome) = state.outcome() {
        return match outcome {
            Outcome::Clarification(request) => EventSummary::new(
                EventStatus::NeedsClarification,
                "Additional information needed",
                request.message.clone(),
            )
            .with_clarification(request.clone()),
            Outcome::Failed(failure) => failed(state, failure),
        };
    }

    match state.decision() {
        Some(decision) => decided(state, decision),
        None => EventSummary::new(
            EventStatus::Error,
            ERROR_SUMMARY,
            "Workflow finished without a scheduling decision",
        )
        .with_notes(merge_notes(None, state.degradation_notes())),
    }
}

fn decided(state: &WorkflowState, decision: &PolicyDecision) -> EventSummary {
    let notes = merge_notes(decision.notes.as_deref(), state.degradation_notes());

    match decision.action {
        PolicyAction::Create => match (state.event(), state.slot()) {
            (Some(event), Some(slot)) => EventSummary::new(
                EventStatus::Confirmed,
                format!("Meeting scheduled in {}", slot.city),
                decision.reason.clone(),
            )
            .with_event_id(event.event_id.clone())
            .with_notes(notes),
            _ => {
                let cause = state
                    .failures()
                    .iter()
                    .rev()
                    .find(|failure| failure.kind.capability() == Some(Capability::Calendar))
                    .map_or("calendar did not confirm the booking", |failure| {
                        failure.message.as_str()
                    });
                EventSummary::new(
                    EventStatus::Error,
                    "Failed to create event",
                    format!("Event not created: {cause}"),
                )
                .with_notes(notes)
            }
        },
        PolicyAction::ProposeCandidates => EventSummary::new(
            EventStatus::Conflict,
            "Calendar conflict detected",
            decision.reason.clone(),
        )
        .with_alternatives(decision.candidates().to_vec())
        .with_notes(notes),
        PolicyAction::AdjustTime | PolicyAction::AdjustPlace => {
            let hint: Vec<String> = decision.venue_hint().map(str::to_string).into_iter().collect();
            let notes = merge_notes(notes.as_deref(), &hint);
            EventSummary::new(
                EventStatus::Adjusted,
                "Event requires adjustment",
                decision.reason.clone(),
            )
            .with_notes(notes)
            .with_suggested_time(decision.suggested_time())
        }
    }
}

fn failed(state: &WorkflowState, failure: &WorkflowFailure) -> EventSummary {
    match failure.kind {
        FailureKind::Parse | FailureKind::Validation => {
            EventSummary::new(EventStatus::Error, ERROR_SUMMARY, failure.message.clone())
                .with_notes(Some(exhausted_guidance()))
        }
        FailureKind::RetryExhausted => EventSummary::new(
            EventStatus::Error,
            "Failed to schedule event after multiple attempts",
            failure.message.clone(),
        )
        .with_notes(merge_notes(
            Some("Maximum retry attempts exceeded"),
            state.degradation_notes(),
        )),
        FailureKind::Weather | FailureKind::Calendar => {
            EventSummary::new(EventStatus::Error, ERROR_SUMMARY, failure.message.clone())
                .with_notes(merge_notes(None, state.degradation_notes()))
        }
    }
}

/// Join decision notes and degradation notes, skipping empties.
pub(crate) fn merge_notes(primary: Option<&str>, extra: &[String]) -> Option<String> {
    let parts: Vec<&str> = primary
        .into_iter()
        .chain(extra.iter().map(String::as_str))
        .filter(|part| !part.trim().is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use raincheck_domain::{Adjustments, MissingField, SchedulingRequest, Slot};

    use super::*;
    use crate::workflow::clarification::clarification_request;
    use crate::workflow::state::Stage;

    fn slot() -> Slot {
        Slot {
            city: "Taipei".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 10, 24).unwrap().and_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 60,
            attendees: vec!["Alice".to_string()],
            description: Some("meeting".to_string()),
        }
    }

    fn create_decision() -> PolicyDecision {
        PolicyDecision {
            action: PolicyAction::Create,
            reason: "No conflicts detected, weather conditions acceptable".to_string(),
            notes: None,
            adjustments: Adjustments::None,
        }
    }

    #[test]
    fn notes_merge_in_order() {
        let extra = vec!["weather down".to_string()];
        assert_eq!(merge_notes(Some("primary"), &extra).as_deref(), Some("primary; weather down"));
        assert_eq!(merge_notes(None, &[]), None);
        assert_eq!(merge_notes(Some("  "), &extra).as_deref(), Some("weather down"));
    }

    #[test]
    fn clarification_outcome_projects_needs_clarification() {
        let mut state = WorkflowState::new(SchedulingRequest::new("meet Alice"));
        state.request_clarification(clarification_request(
            &[MissingField::Location],
            1,
            Default::default(),
        ));

        let summary = finalize(&state);

        assert_eq!(summary.status, EventStatus::NeedsClarification);
        assert_eq!(summary.clarification.unwrap().missing, vec![MissingField::Location]);
        assert_eq!(summary.event_id, None);
    }

    #[test]
    fn create_without_event_is_an_error() {
        let mut state = WorkflowState::new(SchedulingRequest::new("Friday 10am Taipei"));
        state.record_slot(slot());
        state.record_decision(create_decision());
        state.record_failure(
            WorkflowFailure::service(Capability::Calendar, "calendar offline"),
            Stage::Finalize,
        );

        let summary = finalize(&state);

        assert_eq!(summary.status, EventStatus::Error);
        assert_eq!(summary.reason, "Event not created: calendar offline");
    }

    #[test]
    fn terminal_parse_failure_includes_format_example() {
        let mut state = WorkflowState::new(SchedulingRequest::new("meet Bob"));
        state.terminate(WorkflowFailure {
            kind: FailureKind::Parse,
            message: "City not found in input".to_string(),
            missing: vec![MissingField::Location],
        });

        let summary = finalize(&state);

        assert_eq!(summary.status, EventStatus::Error);
        assert!(summary.notes.unwrap().contains("Friday 2pm Taipei meet Alice 60min"));
    }

    #[test]
    fn projection_is_repeatable() {
        let mut state = WorkflowState::new(SchedulingRequest::new("Friday 10am Taipei"));
        state.record_slot(slot());
        state.record_decision(create_decision());
        state.add_degradation_note("Weather information unavailable");

        assert_eq!(finalize(&state), finalize(&state));
    }
}
