//! Wall clock bound to the scheduler timezone.

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use raincheck_core::Clock;
use raincheck_domain::{RaincheckConfig, Result};

/// Current local time in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    /// Clock reporting local time in `timezone`.
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// # Errors
    /// Returns `RaincheckError::Config` for an unknown timezone name.
    pub fn from_config(config: &RaincheckConfig) -> Result<Self> {
        Ok(Self::new(config.timezone()?))
    }

    /// Zone used for local time.
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn now_is_local_wall_clock_time() {
        let clock = SystemClock::new(chrono_tz::Asia::Taipei);
        let expected = chrono_tz::Asia::Taipei
            .from_utc_datetime(&Utc::now().naive_utc())
            .naive_local();

        let drift = clock.now() - expected;
        assert!(drift.num_seconds().abs() < 5, "drift was {drift}");
        assert!(drift < Duration::seconds(5));
    }

    #[test]
    fn timezone_comes_from_config() {
        let mut config = RaincheckConfig::default();
        config.scheduler.timezone = "America/New_York".to_string();

        let clock = SystemClock::from_config(&config).unwrap();
        assert_eq!(clock.timezone(), chrono_tz::America::New_York);

        config.scheduler.timezone = "Nowhere/Special".to_string();
        assert!(SystemClock::from_config(&config).is_err());
    }
}
