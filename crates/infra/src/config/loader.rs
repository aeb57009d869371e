//! Configuration loader
//!
//! Loads scheduler configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `RAINCHECK_TIMEZONE` is not set, falls back to a config file
//! 3. Searches multiple paths for config files (JSON or TOML)
//! 4. Uses built-in defaults when no file exists
//!
//! ## Environment Variables
//! - `RAINCHECK_TIMEZONE`: IANA timezone for relative dates (required)
//! - `RAINCHECK_LOG_LEVEL`: Default tracing filter
//! - `RAINCHECK_LOG_FORMAT`: `pretty` or `json`
//! - `RAINCHECK_WEATHER_MAX_ATTEMPTS`: Attempts per weather call
//! - `RAINCHECK_WEATHER_RETRY_DELAY_MS`: Delay between weather attempts
//! - `RAINCHECK_CALENDAR_MAX_ATTEMPTS`: Attempts per calendar call
//! - `RAINCHECK_CALENDAR_RETRY_DELAY_MS`: Delay between calendar attempts
//! - `RAINCHECK_MAX_RECOVERIES`: Service-failure recoveries per request
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./raincheck.json` or `./raincheck.toml` (current working directory)
//! 2. `../raincheck.json` or `../raincheck.toml` (parent directory)
//! 3. `../../raincheck.json` or `../../raincheck.toml` (grandparent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use raincheck_domain::{LogFormat, RaincheckConfig, RaincheckError, Result};

use crate::errors::InfraError;

const FILE_STEMS: [&str; 3] = ["raincheck", "../raincheck", "../../raincheck"];
const FILE_EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load configuration with automatic fallback strategy
///
/// Environment first, then the first config file found, then defaults.
/// Whatever the source, the result is validated before it is returned.
///
/// # Errors
/// Returns `RaincheckError::Config` if:
/// - An environment variable or config file holds an invalid value
/// - A config file exists but cannot be read or parsed
pub fn load() -> Result<RaincheckConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            match find_config_file() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No config file found, using defaults");
                    Ok(RaincheckConfig::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// `RAINCHECK_TIMEZONE` is required; every other variable falls back to its
/// default when unset.
///
/// # Errors
/// Returns `RaincheckError::Config` if the timezone is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<RaincheckConfig> {
    let mut config = RaincheckConfig::default();
    config.scheduler.timezone = env_var("RAINCHECK_TIMEZONE")?;

    if let Some(level) = optional_var("RAINCHECK_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = optional_var("RAINCHECK_LOG_FORMAT") {
        config.logging.format = LogFormat::from_str(&format).map_err(RaincheckError::Config)?;
    }

    if let Some(attempts) = env_parse("RAINCHECK_WEATHER_MAX_ATTEMPTS")? {
        config.weather.retry.max_attempts = attempts;
    }
    if let Some(delay) = env_parse("RAINCHECK_WEATHER_RETRY_DELAY_MS")? {
        config.weather.retry.delay_ms = delay;
    }
    if let Some(attempts) = env_parse("RAINCHECK_CALENDAR_MAX_ATTEMPTS")? {
        config.calendar.retry.max_attempts = attempts;
    }
    if let Some(delay) = env_parse("RAINCHECK_CALENDAR_RETRY_DELAY_MS")? {
        config.calendar.retry.delay_ms = delay;
    }
    if let Some(recoveries) = env_parse("RAINCHECK_MAX_RECOVERIES")? {
        config.workflow.max_recoveries = recoveries;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RaincheckError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid or a value fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<RaincheckConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RaincheckError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            RaincheckError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(InfraError::from)?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`). Missing
/// sections take their defaults.
fn parse_config(contents: &str, path: &Path) -> Result<RaincheckConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => Ok(serde_json::from_str(contents).map_err(InfraError::from)?),
        _ => Err(RaincheckError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search multiple paths for configuration files
///
/// Searches the current working directory, its two parents, then the same
/// relative locations next to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| {
            FILE_STEMS.iter().flat_map(move |stem| {
                FILE_EXTENSIONS.iter().map(move |ext| root.join(format!("{stem}.{ext}")))
            })
        })
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        RaincheckError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional, non-blank environment variable
fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional numeric environment variable
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| RaincheckError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
