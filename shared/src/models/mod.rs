//! Domain models for the OWM proxy

mod weather;

pub use weather::*;
