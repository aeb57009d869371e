//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;
use std::path::PathBuf;

use raincheck_domain::{LogFormat, RaincheckError};
use raincheck_infra::config;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create config file");
    file.write_all(contents.as_bytes()).expect("Failed to write config file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "raincheck.json",
        r#"{
            "scheduler": { "timezone": "Europe/London" },
            "weather": { "retry": { "max_attempts": 3, "delay_ms": 250 } },
            "workflow": { "max_recoveries": 4 },
            "logging": { "level": "debug", "format": "json" }
        }"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load JSON config");

    assert_eq!(config.scheduler.timezone, "Europe/London");
    assert_eq!(config.weather.retry.max_attempts, 3);
    assert_eq!(config.weather.retry.delay_ms, 250);
    assert_eq!(config.workflow.max_recoveries, 4);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);

    // Sections absent from the file keep their defaults
    assert_eq!(config.calendar.retry.max_attempts, 2);
    assert_eq!(config.workflow.max_clarifications, 1);
}

#[test]
fn test_load_config_from_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "raincheck.toml",
        r#"
[scheduler]
timezone = "America/New_York"

[calendar.retry]
max_attempts = 1
delay_ms = 0
"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load TOML config");

    assert_eq!(config.scheduler.timezone, "America/New_York");
    assert_eq!(config.calendar.retry.max_attempts, 1);
    assert_eq!(config.calendar.retry.delay_ms, 0);
    assert_eq!(config.weather.retry.max_attempts, 2);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_load_config_rejects_unknown_timezone() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path =
        write_config(&dir, "raincheck.json", r#"{ "scheduler": { "timezone": "Mars/Olympus" } }"#);

    let err = config::load_from_file(Some(path)).unwrap_err();

    assert!(matches!(err, RaincheckError::Config(_)));
    assert!(err.to_string().contains("Mars/Olympus"));
}

#[test]
fn test_load_config_rejects_second_clarification() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "raincheck.toml", "[workflow]\nmax_clarifications = 2\n");

    assert!(matches!(config::load_from_file(Some(path)), Err(RaincheckError::Config(_))));
}

#[test]
fn test_load_config_malformed_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "raincheck.toml", "[scheduler\ntimezone = ");

    assert!(matches!(config::load_from_file(Some(path)), Err(RaincheckError::Config(_))));
}

#[test]
fn test_load_config_missing_file() {
    let path = PathBuf::from("/nonexistent/raincheck.json");

    let err = config::load_from_file(Some(path)).unwrap_err();

    assert!(err.to_string().contains("Config file not found"));
}
