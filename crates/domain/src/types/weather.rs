//! Weather assessment for a city at a point in time.

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD};
use crate::errors::{RaincheckError, Result};

/// Precipitation risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Moderate,
    Low,
}

crate::impl_domain_status_conversions!(RiskTier {
    High => "high",
    Moderate => "moderate",
    Low => "low",
});

impl RiskTier {
    /// `>= 60` is high, `30..60` moderate, anything lower is low.
    pub const fn from_probability(probability: u8) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if probability >= MODERATE_RISK_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Forecast returned by a weather oracle.
///
/// The risk tier is always derived from the probability so the two can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherAssessment {
    probability: u8,
    risk: RiskTier,
    description: String,
}

impl WeatherAssessment {
    /// Build an assessment from a precipitation probability in percent.
    ///
    /// # Errors
    ///
    /// Returns [`RaincheckError::InvalidInput`] when the probability exceeds
    /// 100 or the description is blank.
    pub fn new(probability: u8, description: impl Into<String>) -> Result<Self> {
        if probability > 100 {
            return Err(RaincheckError::InvalidInput(format!(
                "precipitation probability must be within 0-100, got {probability}"
            )));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(RaincheckError::InvalidInput(
                "weather description cannot be empty".to_string(),
            ));
        }
        Ok(Self { probability, risk: RiskTier::from_probability(probability), description })
    }

    pub const fn probability(&self) -> u8 {
        self.probability
    }

    pub const fn risk(&self) -> RiskTier {
        self.risk
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
