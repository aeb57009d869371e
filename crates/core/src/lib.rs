//! # Raincheck Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Slot parser and validator
//! - Policy engine
//! - Port interfaces for weather, calendar and time
//! - The scheduling workflow orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `raincheck-common` and `raincheck-domain`
//! - No network, file or platform code
//! - All external capabilities via traits
//! - Pure, testable business logic

pub mod errors;
pub mod parser;
pub mod policy;
pub mod validator;
pub mod workflow;

// Capability ports
pub mod calendar_ports;
pub mod clock_ports;
pub mod weather_ports;

pub use calendar_ports::CalendarOracle;
pub use clock_ports::Clock;
pub use errors::{OracleError, OracleResult};
pub use parser::{parse_slot, RuleBasedParser, SlotExtractor};
pub use policy::decide;
pub use validator::validate_slot;
pub use weather_ports::WeatherOracle;
pub use workflow::{
    finalize, Orchestrator, Outcome, Stage, WorkflowSettings, WorkflowState,
};
