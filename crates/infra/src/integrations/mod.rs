//! Capability implementations behind the core ports
//!
//! - `weather` / `calendar`: deterministic reference oracles for offline use
//! - `testing`: failing and flaky doubles plus a fixed clock

pub mod calendar;
pub mod testing;
pub mod weather;

pub use calendar::{RecurringBusy, ReferenceCalendarOracle};
pub use testing::{FailingCalendarOracle, FailingWeatherOracle, FixedClock, FlakyWeatherOracle};
pub use weather::ReferenceWeatherOracle;
