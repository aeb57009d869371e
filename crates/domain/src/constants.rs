//! Application constants
//!
//! Centralized location for domain-level thresholds and defaults.

// Slot limits
pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 480;
pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_START_HOUR: u32 = 14;
pub const UNKNOWN_ATTENDEE: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "event";

// Weather risk tiers (percent chance of precipitation, inclusive lower bound)
pub const HIGH_RISK_THRESHOLD: u8 = 60;
pub const MODERATE_RISK_THRESHOLD: u8 = 30;

// Conflict resolution
pub const MAX_CANDIDATES: usize = 3;

// Workflow limits
pub const DEFAULT_MAX_CLARIFICATIONS: u32 = 1;
pub const DEFAULT_MAX_RECOVERIES: u32 = 2;
pub const DEFAULT_ORACLE_ATTEMPTS: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 100;

// Scheduler defaults
pub const DEFAULT_TIMEZONE: &str = "Asia/Taipei";

/// Canonical request shown to users who need to rephrase.
pub const FORMAT_EXAMPLE: &str = "Friday 2pm Taipei meet Alice 60min";
