//! Orchestrator tuning derived from configuration.

use std::time::Duration;

use raincheck_common::RetryConfig;
use raincheck_domain::constants::{DEFAULT_MAX_CLARIFICATIONS, DEFAULT_MAX_RECOVERIES};
use raincheck_domain::{RaincheckConfig, RaincheckError, Result, RetrySettings};

/// Retry budgets and recovery ceilings for one orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSettings {
    pub weather_retry: RetryConfig,
    pub calendar_retry: RetryConfig,
    /// Clarification prompts allowed per request lifecycle
    pub max_clarifications: u32,
    /// Non-clarification entries into recovery before the run is aborted
    pub max_recoveries: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            weather_retry: RetryConfig::default(),
            calendar_retry: RetryConfig::default(),
            max_clarifications: DEFAULT_MAX_CLARIFICATIONS,
            max_recoveries: DEFAULT_MAX_RECOVERIES,
        }
    }
}

impl WorkflowSettings {
    /// Build settings from a validated configuration.
    ///
    /// # Errors
    /// Returns `RaincheckError::Config` when the configuration is invalid.
    pub fn from_config(config: &RaincheckConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            weather_retry: fixed_retry(config.weather.retry)?,
            calendar_retry: fixed_retry(config.calendar.retry)?,
            max_clarifications: config.workflow.max_clarifications,
            max_recoveries: config.workflow.max_recoveries,
        })
    }

    /// Keep the attempt budgets but retry immediately.
    #[must_use]
    pub fn without_retry_delay(mut self) -> Self {
        self.weather_retry.delay = Duration::ZERO;
        self.calendar_retry.delay = Duration::ZERO;
        self
    }
}

fn fixed_retry(settings: RetrySettings) -> Result<RetryConfig> {
    RetryConfig::builder()
        .max_attempts(settings.max_attempts)
        .delay(Duration::from_millis(settings.delay_ms))
        .build()
        .map_err(|err| RaincheckError::Config(err.to_string()))
}
