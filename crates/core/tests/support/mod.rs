//! Shared test helpers for `raincheck-core` integration tests.
//!
//! Scripted oracles answer from fixed tables and count every call, so tests
//! can assert both the outcome and how often a capability was consulted.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use raincheck_core::{CalendarOracle, Clock, OracleError, OracleResult, Orchestrator};
use raincheck_core::{WeatherOracle, WorkflowSettings};
use raincheck_domain::{
    AvailabilityResult, BusyInterval, CalendarEvent, Capability, NewEvent, WeatherAssessment,
};

/// 2025-10-17 10:00, a Friday.
pub fn reference_now() -> NaiveDateTime {
    at(2025, 10, 17, 10, 0)
}

/// The Friday one week after [`reference_now`].
pub fn next_friday(hour: u32, minute: u32) -> NaiveDateTime {
    at(2025, 10, 24, hour, minute)
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
}

pub struct StubClock(pub NaiveDateTime);

impl Clock for StubClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Clock that answers `first` once, then `later` for every further read.
pub struct AdvancingClock {
    first: NaiveDateTime,
    later: NaiveDateTime,
    reads: AtomicU32,
}

impl AdvancingClock {
    pub fn new(first: NaiveDateTime, later: NaiveDateTime) -> Self {
        Self { first, later, reads: AtomicU32::new(0) }
    }
}

impl Clock for AdvancingClock {
    fn now(&self) -> NaiveDateTime {
        if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
            self.first
        } else {
            self.later
        }
    }
}

/// Weather answering by hour of day, with optional leading failures.
#[derive(Default)]
pub struct ScriptedWeather {
    default_probability: u8,
    by_hour: Vec<(u32, u8)>,
    failures_left: AtomicU32,
    always_fail: bool,
    calls: AtomicU32,
}

impl ScriptedWeather {
    pub fn clear() -> Self {
        Self::with_probability(10)
    }

    pub fn with_probability(probability: u8) -> Self {
        Self { default_probability: probability, ..Self::default() }
    }

    pub fn unavailable() -> Self {
        Self { always_fail: true, ..Self::default() }
    }

    pub fn hour(mut self, hour: u32, probability: u8) -> Self {
        self.by_hour.push((hour, probability));
        self
    }

    pub fn failing_first(self, count: u32) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherOracle for ScriptedWeather {
    async fn forecast_with_context(
        &self,
        city: &str,
        at: NaiveDateTime,
        _context: &str,
    ) -> OracleResult<WeatherAssessment> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scheduled_failure = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if self.always_fail || scheduled_failure {
            return Err(OracleError::unavailable(Capability::Weather, "forecast backend offline"));
        }

        let probability = self
            .by_hour
            .iter()
            .find(|(hour, _)| *hour == at.hour())
            .map_or(self.default_probability, |(_, probability)| *probability);
        WeatherAssessment::new(probability, format!("{probability}% chance of rain in {city}"))
            .map_err(|err| OracleError::invalid_response(Capability::Weather, err.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarMode {
    Free,
    Busy,
    Unavailable,
    /// Availability works, booking does not.
    BookingFails,
}

/// Calendar with one scripted behaviour and recorded bookings.
pub struct ScriptedCalendar {
    mode: CalendarMode,
    checks: AtomicU32,
    creates: AtomicU32,
    booked: Mutex<Vec<NewEvent>>,
}

impl ScriptedCalendar {
    pub fn new(mode: CalendarMode) -> Self {
        Self {
            mode,
            checks: AtomicU32::new(0),
            creates: AtomicU32::new(0),
            booked: Mutex::new(Vec::new()),
        }
    }

    pub fn checks(&self) -> u32 {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> u32 {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn booked(&self) -> Vec<NewEvent> {
        self.booked.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarOracle for ScriptedCalendar {
    async fn check_availability(
        &self,
        start: NaiveDateTime,
        _duration_minutes: u32,
    ) -> OracleResult<AvailabilityResult> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            CalendarMode::Unavailable => {
                Err(OracleError::unavailable(Capability::Calendar, "calendar backend offline"))
            }
            CalendarMode::Busy => {
                let busy = BusyInterval {
                    event_id: "busy-1".to_string(),
                    start,
                    duration_minutes: 30,
                };
                let candidates = [30, 60, 120]
                    .iter()
                    .map(|minutes| start + chrono::Duration::minutes(*minutes))
                    .collect();
                AvailabilityResult::conflict(busy, candidates).map_err(|err| {
                    OracleError::invalid_response(Capability::Calendar, err.to_string())
                })
            }
            CalendarMode::Free | CalendarMode::BookingFails => Ok(AvailabilityResult::available()),
        }
    }

    async fn create_event(&self, event: NewEvent) -> OracleResult<CalendarEvent> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            CalendarMode::Unavailable | CalendarMode::BookingFails => {
                Err(OracleError::unavailable(Capability::Calendar, "booking rejected"))
            }
            CalendarMode::Free | CalendarMode::Busy => {
                let id = format!("evt-{}", self.creates());
                self.booked.lock().unwrap().push(event.clone());
                Ok(CalendarEvent::from_request(id, event))
            }
        }
    }
}

/// Orchestrator pinned to [`reference_now`] with immediate retries.
pub fn orchestrator(
    weather: Arc<ScriptedWeather>,
    calendar: Arc<ScriptedCalendar>,
) -> Orchestrator {
    Orchestrator::new(weather, calendar, Arc::new(StubClock(reference_now())))
        .with_settings(WorkflowSettings::default().without_retry_delay())
}
