//! Generic retry executor with pluggable policies.
//!
//! An operation is attempted up to `max_attempts` times in total. Between
//! attempts the executor sleeps for a fixed delay. A [`RetryPolicy`] may stop
//! early for errors that are not worth retrying, or override the delay.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Terminal failure of a retried operation.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed; carries the error from the final attempt.
    #[error("all {attempts} attempts failed, last error: {last_error}")]
    AttemptsExhausted { attempts: u32, last_error: E },

    /// The policy refused to retry this error.
    #[error("operation failed with non-retryable error: {error}")]
    NonRetryable { attempts: u32, error: E },
}

impl<E> RetryError<E> {
    /// Number of attempts made before giving up.
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::AttemptsExhausted { attempts, .. } | Self::NonRetryable { attempts, .. } => {
                *attempts
            }
        }
    }

    /// The error returned by the final attempt.
    pub const fn last_error(&self) -> &E {
        match self {
            Self::AttemptsExhausted { last_error, .. } => last_error,
            Self::NonRetryable { error, .. } => error,
        }
    }

    /// Consume the wrapper and return the final attempt's error.
    pub fn into_last_error(self) -> E {
        match self {
            Self::AttemptsExhausted { last_error, .. } => last_error,
            Self::NonRetryable { error, .. } => error,
        }
    }
}

/// Result type for retry operations
pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Invalid retry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid retry configuration: {message}")]
pub struct RetryConfigError {
    message: String,
}

/// Outcome of a retry execution including summary statistics.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: RetryResult<T, E>,
    pub attempts: u32,
    pub total_delay: Duration,
}

impl<T, E> RetryOutcome<T, E> {
    /// Consume the outcome and return only the result.
    pub fn into_result(self) -> RetryResult<T, E> {
        self.result
    }

    /// Whether the operation needed more than one attempt.
    pub const fn was_retried(&self) -> bool {
        self.attempts > 1
    }
}

/// Decides whether a failed attempt should be retried.
pub trait RetryPolicy<E> {
    /// `attempt` is zero-based: 0 is the first failure.
    fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision;
}

/// Decision for whether to retry an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the configured delay
    Retry,
    /// Retry after a specific delay
    RetryAfter(Duration),
    /// Give up immediately
    Stop,
}

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_millis(100),
        }
    }
}

impl RetryConfig {
    /// Start a configuration builder from the defaults.
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RetryConfigError> {
        if self.max_attempts == 0 {
            return Err(RetryConfigError {
                message: "max_attempts must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`RetryConfig`]
#[derive(Debug, Default)]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    /// Builder seeded with [`RetryConfig::default`].
    pub fn new() -> Self {
        Self { config: RetryConfig::default() }
    }

    /// Total attempts, including the first.
    pub const fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Pause between attempts.
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<RetryConfig, RetryConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Runs operations under a [`RetryConfig`] and [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RetryExecutor<P> {
    config: RetryConfig,
    policy: P,
}

impl<P> RetryExecutor<P> {
    /// Executor applying `policy` under `config`.
    pub const fn new(config: RetryConfig, policy: P) -> Self {
        Self { config, policy }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute an operation with retry logic
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> RetryResult<T, E>
    where
        P: RetryPolicy<E>,
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.execute_with_outcome(operation).await.into_result()
    }

    /// Execute an operation and report how many attempts it took.
    #[instrument(name = "retry", skip_all, fields(max_attempts = self.config.max_attempts))]
    pub async fn execute_with_outcome<F, Fut, T, E>(&self, mut operation: F) -> RetryOutcome<T, E>
    where
        P: RetryPolicy<E>,
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt: u32 = 0;
        let mut total_delay = Duration::ZERO;

        loop {
            let attempt_number = attempt + 1;
            debug!(attempt = attempt_number, max_attempts, "executing operation");

            let error = match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempts = attempt_number, "operation succeeded after retry");
                    }
                    return RetryOutcome {
                        result: Ok(value),
                        attempts: attempt_number,
                        total_delay,
                    };
                }
                Err(error) => error,
            };

            if attempt_number >= max_attempts {
                warn!(attempts = attempt_number, error = %error, "retry attempts exhausted");
                return RetryOutcome {
                    result: Err(RetryError::AttemptsExhausted {
                        attempts: attempt_number,
                        last_error: error,
                    }),
                    attempts: attempt_number,
                    total_delay,
                };
            }

            let delay = match self.policy.should_retry(&error, attempt) {
                RetryDecision::Stop => {
                    debug!(error = %error, "retry policy declined to retry");
                    return RetryOutcome {
                        result: Err(RetryError::NonRetryable { attempts: attempt_number, error }),
                        attempts: attempt_number,
                        total_delay,
                    };
                }
                RetryDecision::Retry => self.config.delay,
                RetryDecision::RetryAfter(custom) => custom,
            };

            warn!(
                attempt = attempt_number,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "operation failed, retrying"
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            total_delay += delay;
            attempt += 1;
        }
    }
}

/// Pre-defined retry policies
pub mod policies {
    use super::{RetryDecision, RetryPolicy};
    use crate::error::ErrorClassification;

    /// Retries errors that classify themselves as retryable, honouring any
    /// delay hint they carry.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ClassifiedRetry;

    impl<E: ErrorClassification> RetryPolicy<E> for ClassifiedRetry {
        fn should_retry(&self, error: &E, _attempt: u32) -> RetryDecision {
            if !error.is_retryable() {
                return RetryDecision::Stop;
            }
            error.retry_after().map_or(RetryDecision::Retry, RetryDecision::RetryAfter)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::policies::ClassifiedRetry;
    use super::*;
    use crate::error::{ErrorClassification, ErrorSeverity};

    #[derive(Debug, PartialEq)]
    enum SampleError {
        Transient,
        Fatal,
        Throttled,
    }

    impl fmt::Display for SampleError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self:?}")
        }
    }

    impl ErrorClassification for SampleError {
        fn is_retryable(&self) -> bool {
            !matches!(self, Self::Fatal)
        }

        fn severity(&self) -> ErrorSeverity {
            ErrorSeverity::Warning
        }

        fn retry_after(&self) -> Option<Duration> {
            matches!(self, Self::Throttled).then_some(Duration::from_millis(1))
        }
    }

    fn instant_config(max_attempts: u32) -> RetryConfig {
        RetryConfig::builder()
            .max_attempts(max_attempts)
            .delay(Duration::ZERO)
            .build()
            .unwrap()
    }

    #[test]
    fn default_config_is_two_fixed_attempts() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.delay, Duration::from_millis(100));
    }

    #[test]
    fn builder_rejects_invalid_values() {
        assert!(RetryConfig::builder().max_attempts(0).build().is_err());
    }

    #[tokio::test]
    async fn succeeds_after_transient_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let executor = RetryExecutor::new(instant_config(3), ClassifiedRetry);

        let counter = Arc::clone(&calls);
        let outcome = executor
            .execute_with_outcome(|| {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(SampleError::Transient)
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(outcome.attempts, 2);
        assert!(outcome.was_retried());
        assert_eq!(outcome.result.unwrap(), "done");
    }

    #[tokio::test]
    async fn exhausts_attempts_and_keeps_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let executor = RetryExecutor::new(instant_config(2), ClassifiedRetry);

        let counter = Arc::clone(&calls);
        let result: RetryResult<(), SampleError> = executor
            .execute(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(SampleError::Transient)
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let err = result.unwrap_err();
        assert_eq!(err.attempts(), 2);
        assert_eq!(err.last_error(), &SampleError::Transient);
        assert!(err.to_string().contains("all 2 attempts failed"));
    }

    #[tokio::test]
    async fn fixed_delay_is_paid_between_attempts() {
        let config = RetryConfig::builder()
            .max_attempts(3)
            .delay(Duration::from_millis(2))
            .build()
            .unwrap();
        let executor = RetryExecutor::new(config, ClassifiedRetry);

        let outcome: RetryOutcome<(), SampleError> =
            executor.execute_with_outcome(|| async { Err(SampleError::Transient) }).await;

        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.total_delay, Duration::from_millis(4));
    }

    #[tokio::test]
    async fn classified_policy_skips_fatal_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let executor = RetryExecutor::new(instant_config(3), ClassifiedRetry);

        let counter = Arc::clone(&calls);
        let result: RetryResult<(), SampleError> = executor
            .execute(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(SampleError::Fatal)
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let err = result.unwrap_err();
        assert!(matches!(err, RetryError::NonRetryable { attempts: 1, .. }));
        assert_eq!(err.into_last_error(), SampleError::Fatal);
    }

    #[tokio::test]
    async fn classified_policy_honours_retry_after() {
        let executor = RetryExecutor::new(instant_config(2), ClassifiedRetry);

        let outcome: RetryOutcome<(), SampleError> =
            executor.execute_with_outcome(|| async { Err(SampleError::Throttled) }).await;

        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.total_delay, Duration::from_millis(1));
    }
}
