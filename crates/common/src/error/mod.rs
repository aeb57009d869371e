//! Error classification shared across crates.
//!
//! Domain errors stay owned by the crate that raises them; this module only
//! provides the vocabulary retry and logging code use to reason about them.

use std::fmt;
use std::time::Duration;

/// Classification hooks for errors that cross a capability boundary.
///
/// Retry policies consult [`ErrorClassification::is_retryable`] to decide
/// whether another attempt is worthwhile. Severity drives the log level the
/// caller picks when it records the failure.
pub trait ErrorClassification {
    /// Whether the failure is transient and another attempt may succeed.
    fn is_retryable(&self) -> bool;

    /// Severity used for logging decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Critical errors indicate broken invariants rather than flaky services.
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Suggested delay before the next attempt, if the source reported one.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Expected degradation, worth a warning
    Warning,
    /// Requires attention
    Error,
    /// Internal invariant violated
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
