//! Test doubles for the capability ports.
//!
//! Used by integration tests and demos to exercise retry and degradation
//! paths without a real backend.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use raincheck_core::{CalendarOracle, Clock, OracleError, OracleResult, WeatherOracle};
use raincheck_domain::{AvailabilityResult, CalendarEvent, Capability, NewEvent, WeatherAssessment};

use super::weather::ReferenceWeatherOracle;

/// Weather oracle that is always unavailable.
#[derive(Debug, Default)]
pub struct FailingWeatherOracle {
    calls: AtomicU32,
}

impl FailingWeatherOracle {
    /// Double with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forecast requests received so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherOracle for FailingWeatherOracle {
    async fn forecast_with_context(
        &self,
        _city: &str,
        _at: NaiveDateTime,
        _context: &str,
    ) -> OracleResult<WeatherAssessment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(OracleError::unavailable(Capability::Weather, "weather backend offline"))
    }
}

/// Calendar oracle that is always unavailable.
#[derive(Debug, Default)]
pub struct FailingCalendarOracle {
    checks: AtomicU32,
    creates: AtomicU32,
}

impl FailingCalendarOracle {
    /// Double with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Availability checks received so far.
    pub fn checks(&self) -> u32 {
        self.checks.load(Ordering::SeqCst)
    }

    /// Booking attempts received so far.
    pub fn creates(&self) -> u32 {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CalendarOracle for FailingCalendarOracle {
    async fn check_availability(
        &self,
        _start: NaiveDateTime,
        _duration_minutes: u32,
    ) -> OracleResult<AvailabilityResult> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        Err(OracleError::unavailable(Capability::Calendar, "calendar backend offline"))
    }

    async fn create_event(&self, _event: NewEvent) -> OracleResult<CalendarEvent> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Err(OracleError::unavailable(Capability::Calendar, "calendar backend offline"))
    }
}

/// Weather oracle that fails the first `failures` calls, then answers like
/// [`ReferenceWeatherOracle`].
#[derive(Debug)]
pub struct FlakyWeatherOracle {
    failures: u32,
    calls: AtomicU32,
    inner: ReferenceWeatherOracle,
}

impl FlakyWeatherOracle {
    /// Fail the first `failures` calls.
    pub fn new(failures: u32) -> Self {
        Self { failures, calls: AtomicU32::new(0), inner: ReferenceWeatherOracle::new() }
    }

    /// Forecast requests received so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherOracle for FlakyWeatherOracle {
    async fn forecast_with_context(
        &self,
        city: &str,
        at: NaiveDateTime,
        context: &str,
    ) -> OracleResult<WeatherAssessment> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(OracleError::unavailable(
                Capability::Weather,
                format!("transient failure {}", call + 1),
            ));
        }
        self.inner.forecast_with_context(city, at, context).await
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    /// Clock reading `now` until moved.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: RwLock::new(now) }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        let mut guard = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
