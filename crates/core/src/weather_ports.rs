//! Weather capability port

use async_trait::async_trait;
use chrono::NaiveDateTime;
use raincheck_domain::WeatherAssessment;

use crate::errors::OracleResult;

/// Precipitation forecast for a city at a wall-clock time.
#[async_trait]
pub trait WeatherOracle: Send + Sync {
    /// Forecast with the original request text available as context.
    ///
    /// Implementations may use the context to sharpen the forecast; it is
    /// never required.
    async fn forecast_with_context(
        &self,
        city: &str,
        at: NaiveDateTime,
        context: &str,
    ) -> OracleResult<WeatherAssessment>;

    /// Forecast without any request context.
    async fn forecast(&self, city: &str, at: NaiveDateTime) -> OracleResult<WeatherAssessment> {
        self.forecast_with_context(city, at, "").await
    }
}
