//! # Raincheck Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Reference (deterministic, offline) weather and calendar oracles
//! - Failing/flaky test doubles and a fixed clock
//! - System clock bound to the configured timezone
//! - Configuration loading (environment, JSON/TOML files, defaults)
//! - Tracing subscriber initialisation
//!
//! ## Architecture
//! - Implements traits defined in `raincheck-core`
//! - Depends on `raincheck-domain` and `raincheck-core`
//! - Contains all "impure" code (environment, files, wall clock, ids)

pub mod clock;
pub mod config;
pub mod errors;
pub mod factory;
pub mod integrations;
pub mod observability;

// Re-export commonly used items
pub use clock::SystemClock;
pub use errors::InfraError;
pub use factory::{build_orchestrator, orchestrator_with_clock, reference_orchestrator};
pub use integrations::*;
pub use observability::init_tracing;
