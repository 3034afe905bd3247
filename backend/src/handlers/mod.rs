//! HTTP handlers for the OWM proxy

pub mod health;
pub mod weather;

pub use health::health_check;
pub use weather::get_owm;
