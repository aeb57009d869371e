//! Orchestrator wiring
//!
//! Builds an [`Orchestrator`] from a [`RaincheckConfig`], injecting the
//! capability implementations explicitly.

use std::sync::Arc;

use raincheck_core::{CalendarOracle, Clock, Orchestrator, WeatherOracle, WorkflowSettings};
use raincheck_domain::{RaincheckConfig, Result};
use tracing::info;

use crate::clock::SystemClock;
use crate::integrations::{ReferenceCalendarOracle, ReferenceWeatherOracle};

/// Orchestrator over the reference oracles and the system clock in the
/// configured timezone.
///
/// # Errors
///
/// Returns [`raincheck_domain::RaincheckError::Config`] when the configuration
/// fails validation.
pub fn reference_orchestrator(config: &RaincheckConfig) -> Result<Orchestrator> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::from_config(config)?);
    orchestrator_with_clock(config, clock)
}

/// Same as [`reference_orchestrator`] with an injected clock.
///
/// # Errors
///
/// Returns [`raincheck_domain::RaincheckError::Config`] when the configuration
/// fails validation.
pub fn orchestrator_with_clock(
    config: &RaincheckConfig,
    clock: Arc<dyn Clock>,
) -> Result<Orchestrator> {
    let weather: Arc<dyn WeatherOracle> = Arc::new(ReferenceWeatherOracle::new());
    let calendar: Arc<dyn CalendarOracle> = Arc::new(ReferenceCalendarOracle::new());
    build_orchestrator(config, weather, calendar, clock)
}

/// Orchestrator over arbitrary capability implementations.
///
/// # Errors
///
/// Returns [`raincheck_domain::RaincheckError::Config`] when the configuration
/// fails validation.
pub fn build_orchestrator(
    config: &RaincheckConfig,
    weather: Arc<dyn WeatherOracle>,
    calendar: Arc<dyn CalendarOracle>,
    clock: Arc<dyn Clock>,
) -> Result<Orchestrator> {
    let settings = WorkflowSettings::from_config(config)?;
    info!(
        timezone = %config.scheduler.timezone,
        weather_attempts = settings.weather_retry.max_attempts,
        calendar_attempts = settings.calendar_retry.max_attempts,
        max_recoveries = settings.max_recoveries,
        "orchestrator configured"
    );
    Ok(Orchestrator::new(weather, calendar, clock).with_settings(settings))
}
