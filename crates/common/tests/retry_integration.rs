//! Integration tests for the retry executor through the crate's public API.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use raincheck_common::resilience::policies::ClassifiedRetry;
use raincheck_common::{ErrorClassification, ErrorSeverity, RetryConfig, RetryError, RetryExecutor};

#[derive(Debug)]
struct Outage;

impl fmt::Display for Outage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service unavailable")
    }
}

impl ErrorClassification for Outage {
    fn is_retryable(&self) -> bool {
        true
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }
}

#[tokio::test]
async fn persistent_outage_is_attempted_exactly_max_attempts_times() {
    let config = RetryConfig::builder()
        .max_attempts(2)
        .delay(Duration::from_millis(1))
        .build()
        .unwrap();
    let executor = RetryExecutor::new(config, ClassifiedRetry);
    let calls = Arc::new(AtomicU32::new(0));

    let counter = Arc::clone(&calls);
    let outcome = executor
        .execute_with_outcome(|| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(Outage)
            }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.total_delay, Duration::from_millis(1));
    match outcome.result {
        Err(RetryError::AttemptsExhausted { attempts, last_error }) => {
            assert_eq!(attempts, 2);
            assert_eq!(last_error.to_string(), "service unavailable");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn first_success_makes_a_single_attempt() {
    let executor = RetryExecutor::new(RetryConfig::default(), ClassifiedRetry);

    let outcome = executor.execute_with_outcome(|| async { Ok::<_, Outage>(42) }).await;

    assert_eq!(outcome.attempts, 1);
    assert!(!outcome.was_retried());
    assert_eq!(outcome.result.unwrap(), 42);
}
