//! Shared types and models for the OWM proxy
//!
//! This crate contains the upstream payload model, the compact snapshot
//! returned to callers, and the projection between the two. It performs no
//! I/O so it can be reused by the server and by any client of the service.

pub mod models;
pub mod projection;

pub use models::*;
pub use projection::*;
