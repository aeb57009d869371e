//! Resilience patterns for capabilities that can fail transiently.
//!
//! Only retry is provided. A failed capability is retried a bounded number of
//! times and the final outcome is handed back to the caller, which decides
//! whether to degrade or abort.

pub mod retry;

pub use retry::{
    policies, RetryConfig, RetryConfigBuilder, RetryConfigError, RetryDecision, RetryError,
    RetryExecutor, RetryOutcome, RetryPolicy, RetryResult,
};
