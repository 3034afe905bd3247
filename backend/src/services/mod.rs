//! Business logic services for the OWM proxy

pub mod weather;

pub use weather::WeatherService;
