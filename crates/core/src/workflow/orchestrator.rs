//! Scheduling workflow orchestrator.
//!
//! Drives `ParseIntent → CheckWeather → CheckAvailability → DecidePolicy →
//! Finalize` with `Recover` as a side stage. Each request gets its own
//! [`WorkflowState`]; the orchestrator itself holds only injected
//! capabilities and settings, so one instance can serve many requests.

use std::sync::Arc;

use chrono::NaiveDateTime;
use raincheck_common::resilience::policies::ClassifiedRetry;
use raincheck_common::{RetryConfig, RetryExecutor};
use raincheck_domain::constants::{DEFAULT_DESCRIPTION, UNKNOWN_ATTENDEE};
use raincheck_domain::{
    Capability, CarriedFields, EventSummary, NewEvent, ParseFailure, PolicyAction, RiskTier,
    SchedulingRequest, Slot, WorkflowFailure,
};
use tracing::{debug, info, instrument, warn};

use super::clarification::{clarification_request, CALENDAR_DEGRADED_NOTE, WEATHER_DEGRADED_NOTE};
use super::finalize::{finalize, merge_notes};
use super::settings::WorkflowSettings;
use super::state::{Stage, WorkflowState};
use crate::calendar_ports::CalendarOracle;
use crate::clock_ports::Clock;
use crate::errors::OracleError;
use crate::parser::{RuleBasedParser, SlotExtractor};
use crate::policy;
use crate::validator::validate_slot;
use crate::weather_ports::WeatherOracle;

/// Description used for decisions made without a forecast.
const WEATHER_UNKNOWN: &str = "Weather information unavailable";

/// Weather-aware scheduling workflow
pub struct Orchestrator {
    parser: Arc<dyn SlotExtractor>,
    weather: Arc<dyn WeatherOracle>,
    calendar: Arc<dyn CalendarOracle>,
    clock: Arc<dyn Clock>,
    settings: WorkflowSettings,
}

impl Orchestrator {
    /// Create an orchestrator with the rule-based parser and default settings.
    pub fn new(
        weather: Arc<dyn WeatherOracle>,
        calendar: Arc<dyn CalendarOracle>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            parser: Arc::new(RuleBasedParser),
            weather,
            calendar,
            clock,
            settings: WorkflowSettings::default(),
        }
    }

    /// Replace the slot extractor
    pub fn with_parser(mut self, parser: Arc<dyn SlotExtractor>) -> Self {
        self.parser = parser;
        self
    }

    /// Replace the retry budgets and recovery ceilings
    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current retry and recovery settings
    pub const fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Schedule a fresh request from free text.
    pub async fn schedule(&self, text: &str) -> EventSummary {
        self.run(SchedulingRequest::new(text)).await
    }

    /// Run the workflow and project the final state.
    pub async fn run(&self, request: SchedulingRequest) -> EventSummary {
        let state = self.execute(request).await;
        finalize(&state)
    }

    /// Run the workflow to `Finalize` and return the full state.
    ///
    /// Never fails: every failure ends up recorded on the state.
    #[instrument(skip(self, request), fields(clarification_count = request.clarification_count))]
    pub async fn execute(&self, request: SchedulingRequest) -> WorkflowState {
        let now = self.clock.now();
        let mut state = WorkflowState::new(request);

        while !state.is_finished() {
            let stage = state.stage();
            let next = match stage {
                Stage::ParseIntent => self.parse_intent(&mut state, now),
                Stage::CheckWeather => match state.slot().cloned() {
                    Some(slot) => self.check_weather(&mut state, &slot).await,
                    None => Stage::ParseIntent,
                },
                Stage::CheckAvailability => match state.slot().cloned() {
                    Some(slot) => self.check_availability(&mut state, &slot).await,
                    None => Stage::ParseIntent,
                },
                Stage::DecidePolicy => match state.slot().cloned() {
                    Some(slot) => self.decide_policy(&mut state, &slot, now).await,
                    None => Stage::ParseIntent,
                },
                Stage::Recover => self.recover(&mut state),
                Stage::Finalize => Stage::Finalize,
            };

            debug!(
                stage = %stage,
                next = %next,
                retry_count = state.retry_count(),
                clarification_count = state.clarification_count(),
                "stage complete"
            );
            state.advance(next);
        }

        info!(
            decision = ?state.decision().map(|decision| decision.action),
            event_id = ?state.event().map(|event| event.event_id.as_str()),
            degraded = state.degradation_notes().len(),
            "workflow finished"
        );
        state
    }

    fn parse_intent(&self, state: &mut WorkflowState, now: NaiveDateTime) -> Stage {
        let carried = state.request().carried.clone();

        let mut slot = match self.parser.extract(&state.request().text, now) {
            Ok(slot) => slot,
            Err(failure) => {
                debug!(missing = ?failure.missing, "parse failed");
                state.record_partial(salvage(&failure, &carried));
                return state.record_failure(WorkflowFailure::from(&failure), Stage::ParseIntent);
            }
        };
        apply_carried(&mut slot, &carried);

        // Time may have passed while parsing; the past check uses a fresh read.
        if let Err(violations) = validate_slot(&slot, self.clock.now()) {
            debug!(violations = violations.violations.len(), "validation failed");
            state.record_partial(CarriedFields {
                attendees: known_attendees(&slot.attendees),
                description: slot.description.clone(),
            });
            state.record_slot(slot);
            return state.record_failure(WorkflowFailure::from(&violations), Stage::ParseIntent);
        }

        state.record_slot(slot);
        Stage::CheckWeather
    }

    async fn check_weather(&self, state: &mut WorkflowState, slot: &Slot) -> Stage {
        let oracle = self.weather.as_ref();
        let context = state.request().text.clone();
        let (city, at, text) = (slot.city.as_str(), slot.start, context.as_str());

        let result = executor(&self.settings.weather_retry)
            .execute(move || oracle.forecast_with_context(city, at, text))
            .await;

        match result {
            Ok(assessment) => {
                debug!(
                    probability = assessment.probability(),
                    risk = %assessment.risk(),
                    "weather assessed"
                );
                state.record_weather(assessment);
                Stage::CheckAvailability
            }
            Err(err) => {
                let attempts = err.attempts();
                let error = err.into_last_error();
                state.record_failure(service_failure(&error, attempts), Stage::CheckAvailability)
            }
        }
    }

    async fn check_availability(&self, state: &mut WorkflowState, slot: &Slot) -> Stage {
        let oracle = self.calendar.as_ref();
        let (start, duration) = (slot.start, slot.duration_minutes);

        let result = executor(&self.settings.calendar_retry)
            .execute(move || oracle.check_availability(start, duration))
            .await;

        match result {
            Ok(availability) => {
                debug!(status = %availability.status(), "availability checked");
                state.record_availability(availability);
                Stage::DecidePolicy
            }
            Err(err) => {
                let attempts = err.attempts();
                let error = err.into_last_error();
                state.record_failure(service_failure(&error, attempts), Stage::DecidePolicy)
            }
        }
    }

    async fn decide_policy(
        &self,
        state: &mut WorkflowState,
        slot: &Slot,
        now: NaiveDateTime,
    ) -> Stage {
        let has_conflict = state.availability().is_some_and(|result| result.has_conflict());
        let (risk, description) = state.weather().map_or_else(
            || (RiskTier::Low, WEATHER_UNKNOWN.to_string()),
            |assessment| (assessment.risk(), assessment.description().to_string()),
        );

        let decision = policy::decide(has_conflict, risk, &description);
        let decision = match decision.action {
            PolicyAction::ProposeCandidates => {
                let candidates = state
                    .availability()
                    .map(|result| result.candidates().to_vec())
                    .unwrap_or_default();
                policy::with_candidates(decision, &candidates)
            }
            PolicyAction::AdjustTime => {
                let context = state.request().text.clone();
                let suggestion = self.find_drier_start(slot, &context, now).await;
                policy::with_suggested_time(decision, suggestion)
            }
            PolicyAction::AdjustPlace => {
                let hint = policy::venue_hint(&slot.city, &state.request().text);
                policy::with_venue_hint(decision, hint)
            }
            PolicyAction::Create => decision,
        };

        info!(action = %decision.action, reason = %decision.reason, "policy decided");
        let should_book = decision.action == PolicyAction::Create;
        let notes = merge_notes(decision.notes.as_deref(), state.degradation_notes());
        state.record_decision(decision);

        if !should_book {
            return Stage::Finalize;
        }

        let event = NewEvent {
            city: slot.city.clone(),
            start: slot.start,
            duration_minutes: slot.duration_minutes,
            attendees: slot.attendees.clone(),
            notes,
        };
        let oracle = self.calendar.as_ref();
        let result = executor(&self.settings.calendar_retry)
            .execute(move || oracle.create_event(event.clone()))
            .await;

        match result {
            Ok(created) => {
                info!(event_id = %created.event_id, "event created");
                state.record_event(created);
                Stage::Finalize
            }
            Err(err) => {
                let attempts = err.attempts();
                let error = err.into_last_error();
                state.record_failure(service_failure(&error, attempts), Stage::Finalize)
            }
        }
    }

    /// First shifted start whose forecast is not high risk. These checks are
    /// not retried; a failed check is skipped.
    async fn find_drier_start(
        &self,
        slot: &Slot,
        context: &str,
        now: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        for candidate in policy::shifted_starts(slot.start, now) {
            match self.weather.forecast_with_context(&slot.city, candidate, context).await {
                Ok(assessment) if assessment.risk() != RiskTier::High => {
                    debug!(suggested = %candidate, "found drier start");
                    return Some(candidate);
                }
                Ok(_) => {}
                Err(err) => debug!(candidate = %candidate, error = %err, "skipping shifted start"),
            }
        }
        None
    }

    fn recover(&self, state: &mut WorkflowState) -> Stage {
        let Some((failure, resume)) = state.take_failure() else {
            return Stage::Finalize;
        };

        if failure.kind.needs_clarification() {
            if state.clarification_count() < self.settings.max_clarifications {
                let attempt = state.clarification_count() + 1;
                info!(missing = ?failure.missing, attempt, "requesting clarification");
                let request =
                    clarification_request(&failure.missing, attempt, state.partial().clone());
                return state.request_clarification(request);
            }
            warn!(kind = %failure.kind, "clarification already used, giving up");
            return state.terminate(failure);
        }

        let retry_count = state.count_recovery();
        if retry_count > self.settings.max_recoveries {
            warn!(retry_count, kind = %failure.kind, "recovery limit reached");
            return state.terminate(WorkflowFailure::retry_exhausted(format!(
                "Recovery limit of {} reached. Last failure: {}",
                self.settings.max_recoveries, failure.message
            )));
        }

        let note = match failure.kind.capability() {
            Some(Capability::Weather) => WEATHER_DEGRADED_NOTE,
            Some(Capability::Calendar) => CALENDAR_DEGRADED_NOTE,
            None => return state.terminate(failure),
        };
        info!(kind = %failure.kind, retry_count, resume = %resume, "degrading and continuing");
        state.add_degradation_note(note);
        resume
    }
}

fn executor(config: &RetryConfig) -> RetryExecutor<ClassifiedRetry> {
    RetryExecutor::new(config.clone(), ClassifiedRetry)
}

fn service_failure(error: &OracleError, attempts: u32) -> WorkflowFailure {
    warn!(capability = %error.capability(), attempts, error = %error, "capability unavailable");
    WorkflowFailure::service(error.capability(), error.to_string())
}

fn known_attendees(attendees: &[String]) -> Vec<String> {
    attendees.iter().filter(|name| name.as_str() != UNKNOWN_ATTENDEE).cloned().collect()
}

/// Fields worth keeping from a failed parse, preferring what this turn found.
fn salvage(failure: &ParseFailure, carried: &CarriedFields) -> CarriedFields {
    let attendees = if failure.attendees.is_empty() {
        carried.attendees.clone()
    } else {
        failure.attendees.clone()
    };
    let description = failure
        .description
        .clone()
        .filter(|description| description != DEFAULT_DESCRIPTION)
        .or_else(|| carried.description.clone());
    CarriedFields { attendees, description }
}

/// Fill parser defaults with fields carried over from an earlier turn.
fn apply_carried(slot: &mut Slot, carried: &CarriedFields) {
    let unnamed = known_attendees(&slot.attendees).is_empty();
    if unnamed && !carried.attendees.is_empty() {
        slot.attendees = carried.attendees.clone();
    }

    let generic = slot.description.as_deref().map_or(true, |d| d == DEFAULT_DESCRIPTION);
    if generic {
        if let Some(description) = &carried.description {
            slot.description = Some(description.clone());
        }
    }
}
