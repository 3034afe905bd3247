//! Weather service relaying current conditions from the provider

use shared::{project, CompactWeatherSnapshot};

use crate::error::AppResult;
use crate::external::weather::{OneCallQuery, WeatherClient};

/// Weather service for relaying provider data
#[derive(Clone)]
pub struct WeatherService {
    weather_client: WeatherClient,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(weather_client: WeatherClient) -> Self {
        Self { weather_client }
    }

    /// Fetch One Call data and project it into the compact snapshot
    pub async fn current_conditions(&self, query: &OneCallQuery) -> AppResult<CompactWeatherSnapshot> {
        let body = self.weather_client.fetch_one_call(query).await?;
        let snapshot = project(&body)?;

        tracing::debug!(bytes = body.len(), "Projected One Call payload");

        Ok(snapshot)
    }
}
