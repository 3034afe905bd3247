//! Weather API client for fetching weather data
//!
//! Integrates with the OpenWeatherMap One Call endpoint. The client only
//! transports bytes; decoding lives in `shared::projection`.

use reqwest::Client;

use crate::config::DEFAULT_UPSTREAM_BASE_URL;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// Parameters forwarded verbatim to the One Call endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneCallQuery {
    pub lat: String,
    pub lon: String,
    pub units: String,
    pub exclude: String,
    pub appid: String,
}

impl WeatherClient {
    /// Create a new WeatherClient against the public provider
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_UPSTREAM_BASE_URL.to_string())
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Build the One Call URL.
    ///
    /// Values are substituted as-is, without percent-encoding.
    pub fn request_url(&self, query: &OneCallQuery) -> String {
        format!(
            "{}/onecall?lat={}&lon={}&units={}&exclude={}&appid={}",
            self.base_url.trim_end_matches('/'),
            query.lat,
            query.lon,
            query.units,
            query.exclude,
            query.appid
        )
    }

    /// Fetch the raw One Call body for a location.
    ///
    /// Exactly one request is made. The provider status code is not checked:
    /// error envelopes are returned like any other body. Errors are stripped of
    /// the URL, which embeds the caller's API key.
    pub async fn fetch_one_call(&self, query: &OneCallQuery) -> AppResult<Vec<u8>> {
        let url = self.request_url(query);

        tracing::debug!(lat = %query.lat, lon = %query.lon, units = %query.units, "Requesting One Call data");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamRequest(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Weather provider returned a non-success status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamBody(e.without_url()))?;

        Ok(body.to_vec())
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}
