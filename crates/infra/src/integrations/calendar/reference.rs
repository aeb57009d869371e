//! Deterministic offline calendar oracle.
//!
//! Holds a set of weekly recurring busy intervals (by default Friday 15:00
//! for 30 minutes). A request conflicts when it overlaps any occurrence:
//! `start < busy_end && end > busy_start`. Conflicts offer three
//! alternatives at +30, +60 and +120 minutes from the requested start.

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use raincheck_core::{CalendarOracle, OracleError, OracleResult};
use raincheck_domain::{AvailabilityResult, BusyInterval, CalendarEvent, Capability, NewEvent};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Minutes after the requested start offered as alternatives, nearest first.
pub const CANDIDATE_OFFSETS: [i64; 3] = [30, 60, 120];

/// A weekly busy block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringBusy {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

impl RecurringBusy {
    fn occurrence_on(&self, date: NaiveDate) -> Option<BusyInterval> {
        (date.weekday() == self.weekday).then(|| BusyInterval {
            event_id: format!("busy-{}", date.format("%Y%m%d")),
            start: date.and_time(self.start),
            duration_minutes: self.duration_minutes,
        })
    }
}

impl Default for RecurringBusy {
    fn default() -> Self {
        Self {
            weekday: Weekday::Fri,
            start: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN),
            duration_minutes: 30,
        }
    }
}

/// Reference calendar used for tests, demos and offline runs.
#[derive(Debug, Clone)]
pub struct ReferenceCalendarOracle {
    busy: Vec<RecurringBusy>,
}

impl Default for ReferenceCalendarOracle {
    fn default() -> Self {
        Self { busy: vec![RecurringBusy::default()] }
    }
}

impl ReferenceCalendarOracle {
    /// Calendar with the recurring busy interval.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar with exactly the given recurring blocks.
    pub fn with_busy(busy: Vec<RecurringBusy>) -> Self {
        Self { busy }
    }

    fn first_overlap(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<BusyInterval> {
        // A slot can cross midnight, so every date it touches is checked.
        let mut date = start.date();
        while date <= end.date() {
            let hit = self
                .busy
                .iter()
                .filter_map(|rule| rule.occurrence_on(date))
                .find(|busy| start < busy.end() && end > busy.start);
            if hit.is_some() {
                return hit;
            }
            date = date.succ_opt()?;
        }
        None
    }
}

#[async_trait]
impl CalendarOracle for ReferenceCalendarOracle {
    #[instrument(skip(self))]
    async fn check_availability(
        &self,
        start: NaiveDateTime,
        duration_minutes: u32,
    ) -> OracleResult<AvailabilityResult> {
        let end = start + Duration::minutes(i64::from(duration_minutes));

        let Some(busy) = self.first_overlap(start, end) else {
            debug!("slot is free");
            return Ok(AvailabilityResult::available());
        };

        debug!(busy_id = %busy.event_id, busy_start = %busy.start, "slot overlaps busy interval");
        let candidates =
            CANDIDATE_OFFSETS.iter().map(|offset| start + Duration::minutes(*offset)).collect();
        AvailabilityResult::conflict(busy, candidates)
            .map_err(|err| OracleError::invalid_response(Capability::Calendar, err.to_string()))
    }

    #[instrument(skip(self, event), fields(city = %event.city, start = %event.start))]
    async fn create_event(&self, event: NewEvent) -> OracleResult<CalendarEvent> {
        let event_id = format!("evt-{}", Uuid::new_v4().simple());
        info!(event_id = %event_id, "event booked");
        Ok(CalendarEvent::from_request(event_id, event))
    }
}
