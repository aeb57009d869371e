//! Calendar capability port

use async_trait::async_trait;
use chrono::NaiveDateTime;
use raincheck_domain::{AvailabilityResult, CalendarEvent, NewEvent};

use crate::errors::OracleResult;

/// Trait for calendar provider operations
#[async_trait]
pub trait CalendarOracle: Send + Sync {
    /// Check whether `[start, start + duration)` is free.
    async fn check_availability(
        &self,
        start: NaiveDateTime,
        duration_minutes: u32,
    ) -> OracleResult<AvailabilityResult>;

    /// Book the event and return it with its assigned id.
    async fn create_event(&self, event: NewEvent) -> OracleResult<CalendarEvent>;
}
