//! Weather data models

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// One Call payload as returned by the weather provider.
///
/// Decoding is lenient: unknown fields are ignored, and absent or `null`
/// fields fall back to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullWeatherSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lon: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone_offset: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current: CurrentConditions,
}

/// Present-moment conditions block of the provider payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feels_like: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pressure: f64,
    /// Percentage, passed through unchecked
    #[serde(default, deserialize_with = "null_as_default")]
    pub humidity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dew_point: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uvi: f64,
    /// Cloud cover percentage
    #[serde(default, deserialize_with = "null_as_default")]
    pub clouds: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visibility: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_speed: f64,
    /// Degrees
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_deg: i64,
}

/// Short-keyed snapshot returned to callers of `/owm`.
///
/// Field order is part of the wire format. Every field is always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompactWeatherSnapshot {
    #[serde(rename = "t", serialize_with = "plain_float")]
    pub temp: f64,
    #[serde(rename = "f", serialize_with = "plain_float")]
    pub feels_like: f64,
    #[serde(rename = "p", serialize_with = "plain_float")]
    pub pressure: f64,
    #[serde(rename = "h")]
    pub humidity: i64,
    #[serde(rename = "d", serialize_with = "plain_float")]
    pub dew_point: f64,
    #[serde(rename = "u", serialize_with = "plain_float")]
    pub uvi: f64,
    #[serde(rename = "c")]
    pub clouds: i64,
    #[serde(rename = "v")]
    pub visibility: i64,
    #[serde(rename = "ws", serialize_with = "plain_float")]
    pub wind_speed: f64,
    #[serde(rename = "wd")]
    pub wind_deg: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Writes shortest digits in plain notation (`0`, `1013`, `21.5`), switching
/// to exponent form only below `1e-6` or from `1e21` upward (`5e-7`, `1e+21`).
fn plain_float<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return serializer.serialize_f64(*value);
    }

    let abs = value.abs();
    let text = if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let sci = format!("{:e}", value);
        match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => sci,
        }
    } else {
        format!("{}", value)
    };

    let raw = RawValue::from_string(text).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}
