//! Health check handlers

/// Health check endpoint handler
pub async fn health_check() -> &'static str {
    "OK"
}
