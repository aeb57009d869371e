//! Tracing initialisation
//!
//! Installs a global `tracing-subscriber` registry for the scheduler:
//! - `RUST_LOG` wins over the configured level
//! - `pretty` or `json` output, chosen by [`LogFormat`]
//! - safe to call more than once; only the first call installs anything

use std::sync::OnceLock;

use raincheck_domain::{LogFormat, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::InfraError;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(true)` when this call installed the subscriber and `Ok(false)`
/// when tracing was already initialised, by this function or by someone else.
///
/// # Errors
/// Returns `RaincheckError::Config` if the configured level is not a valid
/// filter directive.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    if TRACING_INIT.get().is_some() {
        return Ok(false);
    }

    let filter = build_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init(),
    };

    let _ = TRACING_INIT.set(());
    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.level, format = %config.format, "tracing initialised");
            Ok(true)
        }
        Err(err) => {
            let err = InfraError::from(err);
            tracing::debug!(error = ?err, "global subscriber already installed");
            Ok(false)
        }
    }
}

/// `RUST_LOG` if set and valid, otherwise the configured level.
fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(level.trim()).map_err(InfraError::from)?)
}
