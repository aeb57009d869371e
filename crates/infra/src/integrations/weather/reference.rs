//! Deterministic offline weather oracle.
//!
//! Rules, first match wins:
//! 1. the request text mentions rain: 70%
//! 2. Friday 14:00-16:00 is a fixed rainy window: 65%
//! 3. otherwise: 15%
//!
//! The risk tier is always derived from the probability.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use raincheck_core::{OracleError, OracleResult, WeatherOracle};
use raincheck_domain::{Capability, WeatherAssessment};
use tracing::instrument;

const RAIN_WORDS: [&str; 3] = ["rain", "rainy", "raining"];
const KEYWORD_PROBABILITY: u8 = 70;
const RAINY_WINDOW_PROBABILITY: u8 = 65;
const CLEAR_PROBABILITY: u8 = 15;

/// Reference forecast used for tests, demos and offline runs.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceWeatherOracle {
    rainy_day: Weekday,
    rainy_hours: (u32, u32),
}

impl Default for ReferenceWeatherOracle {
    fn default() -> Self {
        Self { rainy_day: Weekday::Fri, rainy_hours: (14, 16) }
    }
}

impl ReferenceWeatherOracle {
    /// Oracle applying the deterministic forecast rules.
    pub fn new() -> Self {
        Self::default()
    }

    fn in_rainy_window(&self, at: NaiveDateTime) -> bool {
        let (from, until) = self.rainy_hours;
        at.weekday() == self.rainy_day && (from..until).contains(&at.hour())
    }
}

fn mentions_rain(context: &str) -> bool {
    context
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| RAIN_WORDS.contains(&word))
}

#[async_trait]
impl WeatherOracle for ReferenceWeatherOracle {
    #[instrument(skip(self, context))]
    async fn forecast_with_context(
        &self,
        city: &str,
        at: NaiveDateTime,
        context: &str,
    ) -> OracleResult<WeatherAssessment> {
        let when = at.format("%A %H:%M");
        let (probability, description) = if mentions_rain(context) {
            (KEYWORD_PROBABILITY, format!("High chance of rain detected in {city} for {when}"))
        } else if self.in_rainy_window(at) {
            (
                RAINY_WINDOW_PROBABILITY,
                format!("Typical rainy period in {city} on {} afternoon", at.format("%A")),
            )
        } else {
            (CLEAR_PROBABILITY, format!("Clear weather expected in {city} for {when}"))
        };

        WeatherAssessment::new(probability, description)
            .map_err(|err| OracleError::invalid_response(Capability::Weather, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use raincheck_domain::RiskTier;

    use super::*;

    fn friday(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 24).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn rain_keyword_overrides_everything() {
        let oracle = ReferenceWeatherOracle::new();
        let forecast = oracle
            .forecast_with_context("Taipei", friday(10, 0), "walk if it's not raining")
            .await
            .unwrap();

        assert_eq!(forecast.probability(), 70);
        assert_eq!(forecast.risk(), RiskTier::High);
        assert_eq!(
            forecast.description(),
            "High chance of rain detected in Taipei for Friday 10:00"
        );
    }

    #[tokio::test]
    async fn friday_afternoon_window_is_rainy() {
        let oracle = ReferenceWeatherOracle::new();

        let inside = oracle.forecast("Taipei", friday(15, 59)).await.unwrap();
        assert_eq!(inside.probability(), 65);
        assert_eq!(inside.description(), "Typical rainy period in Taipei on Friday afternoon");

        let after = oracle.forecast("Taipei", friday(16, 0)).await.unwrap();
        assert_eq!(after.risk(), RiskTier::Low);
    }

    #[tokio::test]
    async fn default_is_clear() {
        let oracle = ReferenceWeatherOracle::new();
        let forecast = oracle
            .forecast_with_context("London", friday(10, 0), "brainstorm in the Strand")
            .await
            .unwrap();

        assert_eq!(forecast.probability(), 15);
        assert_eq!(forecast.risk(), RiskTier::Low);
        assert!(forecast.description().starts_with("Clear weather expected in London"));
    }
}
