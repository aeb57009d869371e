//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use raincheck_domain::RaincheckError;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;
use tracing_subscriber::filter::ParseError as FilterError;
use tracing_subscriber::util::TryInitError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RaincheckError);

impl From<InfraError> for RaincheckError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RaincheckError> for InfraError {
    fn from(value: RaincheckError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRaincheckError {
    fn into_raincheck(self) -> RaincheckError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → RaincheckError */
/* -------------------------------------------------------------------------- */

impl IntoRaincheckError for IoError {
    fn into_raincheck(self) -> RaincheckError {
        match self.kind() {
            ErrorKind::NotFound => RaincheckError::Config(format!("Config file not found: {self}")),
            ErrorKind::PermissionDenied => {
                RaincheckError::Config(format!("Config file is not readable: {self}"))
            }
            ErrorKind::InvalidData => {
                RaincheckError::Config(format!("Config file is not valid UTF-8: {self}"))
            }
            _ => RaincheckError::Config(format!("Failed to read config file: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_raincheck())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → RaincheckError */
/* -------------------------------------------------------------------------- */

impl IntoRaincheckError for JsonError {
    fn into_raincheck(self) -> RaincheckError {
        RaincheckError::Config(format!("Invalid JSON format: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_raincheck())
    }
}

impl IntoRaincheckError for TomlError {
    fn into_raincheck(self) -> RaincheckError {
        RaincheckError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_raincheck())
    }
}

/* -------------------------------------------------------------------------- */
/* tracing-subscriber → RaincheckError */
/* -------------------------------------------------------------------------- */

impl IntoRaincheckError for FilterError {
    fn into_raincheck(self) -> RaincheckError {
        RaincheckError::Config(format!("Invalid log filter: {self}"))
    }
}

impl From<FilterError> for InfraError {
    fn from(value: FilterError) -> Self {
        InfraError(value.into_raincheck())
    }
}

impl IntoRaincheckError for TryInitError {
    fn into_raincheck(self) -> RaincheckError {
        RaincheckError::Internal(format!("Failed to install tracing subscriber: {self}"))
    }
}

impl From<TryInitError> for InfraError {
    fn from(value: TryInitError) -> Self {
        InfraError(value.into_raincheck())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
