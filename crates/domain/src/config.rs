//! Configuration structures
//!
//! Loading lives in `raincheck-infra`; this module only defines the shape,
//! the defaults and the validation rules.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_CLARIFICATIONS, DEFAULT_MAX_RECOVERIES, DEFAULT_ORACLE_ATTEMPTS,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEZONE,
};
use crate::errors::{RaincheckError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaincheckConfig {
    pub scheduler: SchedulerConfig,
    pub weather: OracleConfig,
    pub calendar: OracleConfig,
    pub workflow: WorkflowConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// IANA timezone that relative expressions resolve in
    pub timezone: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { timezone: DEFAULT_TIMEZONE.to_string() }
    }
}

/// Settings for one external capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts per call, including the first
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_ORACLE_ATTEMPTS, delay_ms: DEFAULT_RETRY_DELAY_MS }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub max_clarifications: u32,
    /// Non-clarification recoveries allowed before the run is aborted
    pub max_recoveries: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_clarifications: DEFAULT_MAX_CLARIFICATIONS,
            max_recoveries: DEFAULT_MAX_RECOVERIES,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

crate::impl_domain_status_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}

impl RaincheckConfig {
    /// Parsed scheduler timezone.
    ///
    /// # Errors
    /// Returns `RaincheckError::Config` for names chrono-tz does not know.
    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        self.scheduler.timezone.parse::<chrono_tz::Tz>().map_err(|err| {
            RaincheckError::Config(format!(
                "Unknown timezone '{}': {err}",
                self.scheduler.timezone
            ))
        })
    }

    /// Check cross-field rules that serde defaults cannot express.
    ///
    /// # Errors
    /// Returns `RaincheckError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.timezone()?;

        for (name, oracle) in [("weather", &self.weather), ("calendar", &self.calendar)] {
            if oracle.retry.max_attempts == 0 {
                return Err(RaincheckError::Config(format!(
                    "{name}.retry.max_attempts must be at least 1"
                )));
            }
        }

        if self.workflow.max_clarifications > DEFAULT_MAX_CLARIFICATIONS {
            return Err(RaincheckError::Config(format!(
                "workflow.max_clarifications cannot exceed {DEFAULT_MAX_CLARIFICATIONS}"
            )));
        }
        if self.workflow.max_recoveries == 0 {
            return Err(RaincheckError::Config(
                "workflow.max_recoveries must be at least 1".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(RaincheckError::Config("logging.level cannot be empty".to_string()));
        }

        Ok(())
    }
}
