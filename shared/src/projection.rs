//! Projection of the provider payload into the compact snapshot

use thiserror::Error;

use crate::models::{CompactWeatherSnapshot, FullWeatherSnapshot};

/// Errors produced while projecting a provider payload
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("could not decode weather payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<&FullWeatherSnapshot> for CompactWeatherSnapshot {
    fn from(full: &FullWeatherSnapshot) -> Self {
        let current = &full.current;

        CompactWeatherSnapshot {
            temp: current.temp,
            feels_like: current.feels_like,
            pressure: current.pressure,
            humidity: current.humidity,
            dew_point: current.dew_point,
            uvi: current.uvi,
            clouds: current.clouds,
            visibility: current.visibility,
            wind_speed: current.wind_speed,
            wind_deg: current.wind_deg,
        }
    }
}

/// Decode a raw provider body
pub fn decode(body: &[u8]) -> Result<FullWeatherSnapshot, ProjectionError> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a raw provider body and keep only the current conditions
pub fn project(body: &[u8]) -> Result<CompactWeatherSnapshot, ProjectionError> {
    let full = decode(body)?;
    Ok(CompactWeatherSnapshot::from(&full))
}
