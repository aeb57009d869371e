//! Domain types and models

pub mod availability;
pub mod event;
pub mod failure;
pub mod policy;
pub mod request;
pub mod slot;
pub mod summary;
pub mod weather;

pub use availability::{AvailabilityResult, AvailabilityStatus, BusyInterval};
pub use event::{CalendarEvent, NewEvent};
pub use failure::{
    Capability, FailureKind, MissingField, ParseFailure, SlotViolation, ValidationFailure,
    WorkflowFailure,
};
pub use policy::{Adjustments, PolicyAction, PolicyDecision};
pub use request::{CarriedFields, SchedulingRequest};
pub use slot::Slot;
pub use summary::{ClarificationRequest, EventStatus, EventSummary};
pub use weather::{RiskTier, WeatherAssessment};
