//! Time source port

use chrono::NaiveDateTime;

/// Supplies "now" as wall-clock time in the scheduler's timezone.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
