//! Scheduling workflow: state machine, recovery and final projection.

mod clarification;
mod finalize;
mod orchestrator;
mod settings;
mod state;

pub use self::clarification::{
    clarification_request, exhausted_guidance, guidance, CALENDAR_DEGRADED_NOTE,
    WEATHER_DEGRADED_NOTE,
};
pub use self::finalize::finalize;
pub use self::orchestrator::Orchestrator;
pub use self::settings::WorkflowSettings;
pub use self::state::{Outcome, Stage, WorkflowState};
