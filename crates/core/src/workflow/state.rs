//! Request-scoped workflow state.
//!
//! Every field is declared up front and only the orchestrator mutates it,
//! through the transition methods below. Readers get shared references.

use raincheck_domain::{
    AvailabilityResult, CalendarEvent, CarriedFields, ClarificationRequest, PolicyDecision,
    SchedulingRequest, Slot, WeatherAssessment, WorkflowFailure,
};

/// Position in the scheduling state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Extract and validate a slot from the request text
    ParseIntent,
    /// Assess rain risk for the slot
    CheckWeather,
    /// Look for calendar conflicts
    CheckAvailability,
    /// Choose the policy action and book on create
    DecidePolicy,
    /// Route a recorded failure to clarification, degradation or abort
    Recover,
    /// Project the state into a summary
    Finalize,
}

raincheck_domain::impl_domain_status_conversions!(Stage {
    ParseIntent => "parse_intent",
    CheckWeather => "check_weather",
    CheckAvailability => "check_availability",
    DecidePolicy => "decide_policy",
    Recover => "recover",
    Finalize => "finalize",
});

/// Terminal outcome decided by recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Ask the caller for the missing fields.
    Clarification(ClarificationRequest),
    /// Stop without an event.
    Failed(WorkflowFailure),
}

#[derive(Debug, Clone)]
pub struct WorkflowState {
    request: SchedulingRequest,
    stage: Stage,
    slot: Option<Slot>,
    partial: CarriedFields,
    weather: Option<WeatherAssessment>,
    availability: Option<AvailabilityResult>,
    decision: Option<PolicyDecision>,
    event: Option<CalendarEvent>,
    pending_failure: Option<(WorkflowFailure, Stage)>,
    failures: Vec<WorkflowFailure>,
    retry_count: u32,
    clarification_count: u32,
    degradation_notes: Vec<String>,
    outcome: Option<Outcome>,
}

impl WorkflowState {
    pub fn new(request: SchedulingRequest) -> Self {
        let clarification_count = request.clarification_count;
        Self {
            request,
            stage: Stage::ParseIntent,
            slot: None,
            partial: CarriedFields::default(),
            weather: None,
            availability: None,
            decision: None,
            event: None,
            pending_failure: None,
            failures: Vec::new(),
            retry_count: 0,
            clarification_count,
            degradation_notes: Vec::new(),
            outcome: None,
        }
    }

    pub const fn request(&self) -> &SchedulingRequest {
        &self.request
    }

    pub const fn stage(&self) -> Stage {
        self.stage
    }

    pub const fn slot(&self) -> Option<&Slot> {
        self.slot.as_ref()
    }

    /// Fields salvaged from a request that could not be completed.
    pub const fn partial(&self) -> &CarriedFields {
        &self.partial
    }

    pub const fn weather(&self) -> Option<&WeatherAssessment> {
        self.weather.as_ref()
    }

    pub const fn availability(&self) -> Option<&AvailabilityResult> {
        self.availability.as_ref()
    }

    pub const fn decision(&self) -> Option<&PolicyDecision> {
        self.decision.as_ref()
    }

    pub const fn event(&self) -> Option<&CalendarEvent> {
        self.event.as_ref()
    }

    /// Every failure recorded during the run, oldest first.
    pub fn failures(&self) -> &[WorkflowFailure] {
        &self.failures
    }

    /// Failure waiting to be handled by recovery.
    pub fn pending_failure(&self) -> Option<&WorkflowFailure> {
        self.pending_failure.as_ref().map(|(failure, _)| failure)
    }

    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub const fn clarification_count(&self) -> u32 {
        self.clarification_count
    }

    pub fn degradation_notes(&self) -> &[String] {
        &self.degradation_notes
    }

    pub const fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finalize
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        self.stage = next;
    }

    pub(crate) fn record_slot(&mut self, slot: Slot) {
        self.slot = Some(slot);
    }

    pub(crate) fn record_partial(&mut self, partial: CarriedFields) {
        self.partial = partial;
    }

    pub(crate) fn record_weather(&mut self, weather: WeatherAssessment) {
        self.weather = Some(weather);
    }

    pub(crate) fn record_availability(&mut self, availability: AvailabilityResult) {
        self.availability = Some(availability);
    }

    pub(crate) fn record_decision(&mut self, decision: PolicyDecision) {
        self.decision = Some(decision);
    }

    pub(crate) fn record_event(&mut self, event: CalendarEvent) {
        self.event = Some(event);
    }

    /// Park a failure for recovery; `resume` is where forward progress
    /// continues if recovery degrades instead of stopping.
    pub(crate) fn record_failure(&mut self, failure: WorkflowFailure, resume: Stage) -> Stage {
        self.failures.push(failure.clone());
        self.pending_failure = Some((failure, resume));
        Stage::Recover
    }

    pub(crate) fn take_failure(&mut self) -> Option<(WorkflowFailure, Stage)> {
        self.pending_failure.take()
    }

    /// Count one non-clarification recovery and return the new total.
    pub(crate) fn count_recovery(&mut self) -> u32 {
        self.retry_count += 1;
        self.retry_count
    }

    pub(crate) fn add_degradation_note(&mut self, note: &str) {
        if !self.degradation_notes.iter().any(|existing| existing == note) {
            self.degradation_notes.push(note.to_string());
        }
    }

    pub(crate) fn request_clarification(&mut self, clarification: ClarificationRequest) -> Stage {
        self.clarification_count = clarification.attempt;
        self.outcome = Some(Outcome::Clarification(clarification));
        Stage::Finalize
    }

    pub(crate) fn terminate(&mut self, failure: WorkflowFailure) -> Stage {
        self.outcome = Some(Outcome::Failed(failure));
        Stage::Finalize
    }
}

#[cfg(test)]
mod tests {
    use raincheck_domain::{Capability, FailureKind};

    use super::*;

    #[test]
    fn new_state_starts_at_parse_with_carried_count() {
        let mut request = SchedulingRequest::new("meet Bob");
        request.clarification_count = 1;

        let state = WorkflowState::new(request);

        assert_eq!(state.stage(), Stage::ParseIntent);
        assert_eq!(state.clarification_count(), 1);
        assert_eq!(state.retry_count(), 0);
        assert!(state.outcome().is_none());
    }

    #[test]
    fn failures_are_parked_until_recovery_takes_them() {
        let mut state = WorkflowState::new(SchedulingRequest::new("Friday 2pm Taipei"));
        let failure = WorkflowFailure::service(Capability::Weather, "timeout");

        let next = state.record_failure(failure.clone(), Stage::CheckAvailability);

        assert_eq!(next, Stage::Recover);
        assert_eq!(state.pending_failure().map(|f| f.kind), Some(FailureKind::Weather));
        assert_eq!(state.take_failure(), Some((failure, Stage::CheckAvailability)));
        assert!(state.pending_failure().is_none());
        assert_eq!(state.failures().len(), 1);
    }

    #[test]
    fn degradation_notes_are_deduplicated_in_order() {
        let mut state = WorkflowState::new(SchedulingRequest::new("x"));
        state.add_degradation_note("weather down");
        state.add_degradation_note("calendar down");
        state.add_degradation_note("weather down");

        assert_eq!(state.degradation_notes(), &["weather down", "calendar down"]);
    }

    #[test]
    fn stage_labels_are_snake_case() {
        assert_eq!(Stage::CheckAvailability.to_string(), "check_availability");
        assert_eq!("decide_policy".parse::<Stage>(), Ok(Stage::DecidePolicy));
    }
}
