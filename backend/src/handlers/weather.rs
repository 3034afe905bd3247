//! HTTP handler for the compact weather endpoint

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::config::UpstreamConfig;
use crate::external::weather::OneCallQuery;
use crate::services::weather::WeatherService;
use crate::AppState;

/// Query parameters for `/owm`.
///
/// Nothing is validated; missing `lat`, `lon` and `appid` are forwarded as
/// empty strings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OwmQuery {
    pub lat: String,
    pub lon: String,
    pub units: Option<String>,
    pub exclude: Option<String>,
    pub appid: String,
}

impl OwmQuery {
    /// Collect the known keys from raw query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let (mut lat, mut lon, mut units, mut exclude, mut appid) = (None, None, None, None, None);

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut lat,
                "lon" => &mut lon,
                "units" => &mut units,
                "exclude" => &mut exclude,
                "appid" => &mut appid,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Self {
            lat: lat.unwrap_or_default(),
            lon: lon.unwrap_or_default(),
            units,
            exclude,
            appid: appid.unwrap_or_default(),
        }
    }

    /// Fill in the configured defaults for absent `units` and `exclude`
    pub fn into_one_call(self, upstream: &UpstreamConfig) -> OneCallQuery {
        OneCallQuery {
            lat: self.lat,
            lon: self.lon,
            units: self
                .units
                .unwrap_or_else(|| upstream.default_units.clone()),
            exclude: self
                .exclude
                .unwrap_or_else(|| upstream.default_exclude.clone()),
            appid: self.appid,
        }
    }
}

/// Relay current conditions for a location
pub async fn get_owm(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = OwmQuery::from_pairs(pairs);

    let shown = if state.config.logging.reveal_api_key {
        query.appid.clone()
    } else {
        redact_api_key(&query.appid)
    };
    tracing::info!("appID: {}", shown);

    let query = query.into_one_call(&state.config.upstream);
    let service = WeatherService::new(state.weather_client.clone());

    match service.current_conditions(&query).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => state.config.server.on_failure.resolve(err),
    }
}

/// Mask an API key for logging.
///
/// Keys longer than eight characters keep their first four; shorter keys are
/// masked entirely.
pub fn redact_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    if key.chars().count() <= 8 {
        return "***".to_string();
    }
    let prefix: String = key.chars().take(4).collect();
    format!("{}***", prefix)
}
