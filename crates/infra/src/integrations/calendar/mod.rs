//! Calendar capability implementations

pub mod reference;

pub use reference::{RecurringBusy, ReferenceCalendarOracle};
