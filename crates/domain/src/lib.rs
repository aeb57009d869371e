//! # Raincheck Domain
//!
//! Business domain types for the weather-aware scheduler.
//!
//! This crate contains:
//! - Slot, weather, availability, policy and summary types
//! - Failure records exchanged between workflow stages
//! - Error types and the `Result` alias
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other Raincheck crates
//! - Pure data structures; no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
