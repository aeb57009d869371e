//! Errors raised by external capabilities behind the core ports.

use raincheck_common::{ErrorClassification, ErrorSeverity};
use raincheck_domain::{Capability, RaincheckError};
use thiserror::Error;

/// Failure reported by a weather or calendar oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The backend could not answer; worth retrying.
    #[error("{capability} service unavailable: {message}")]
    ServiceUnavailable { capability: Capability, message: String },

    /// The backend answered with data that violates a domain invariant.
    #[error("{capability} service returned an invalid response: {message}")]
    InvalidResponse { capability: Capability, message: String },
}

impl OracleError {
    /// Retryable outage of `capability`.
    pub fn unavailable(capability: Capability, message: impl Into<String>) -> Self {
        Self::ServiceUnavailable { capability, message: message.into() }
    }

    /// Non-retryable malformed answer from `capability`.
    pub fn invalid_response(capability: Capability, message: impl Into<String>) -> Self {
        Self::InvalidResponse { capability, message: message.into() }
    }

    /// Capability that produced the error.
    pub const fn capability(&self) -> Capability {
        match self {
            Self::ServiceUnavailable { capability, .. }
            | Self::InvalidResponse { capability, .. } => *capability,
        }
    }
}

impl ErrorClassification for OracleError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { .. })
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ServiceUnavailable { .. } => ErrorSeverity::Warning,
            Self::InvalidResponse { .. } => ErrorSeverity::Error,
        }
    }
}

impl From<OracleError> for RaincheckError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::ServiceUnavailable { .. } => Self::ServiceUnavailable(err.to_string()),
            OracleError::InvalidResponse { .. } => Self::Internal(err.to_string()),
        }
    }
}

/// Result alias for oracle calls
pub type OracleResult<T> = std::result::Result<T, OracleError>;
