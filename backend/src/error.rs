//! Error handling for the OWM proxy
//!
//! Every request failure is surfaced as an [`AppError`] and handed to the
//! configured [`FailurePolicy`], which is the only place deciding whether the
//! process survives it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::ProjectionError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Upstream errors
    #[error("could not GET URL: {0}")]
    UpstreamRequest(#[source] reqwest::Error),

    #[error("could not read body: {0}")]
    UpstreamBody(#[source] reqwest::Error),

    // Payload errors
    #[error("could not unmarshal body: {0}")]
    Decode(#[from] ProjectionError),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::UpstreamRequest(_) | AppError::UpstreamBody(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "UPSTREAM_UNAVAILABLE".to_string(),
                    message: "Weather provider could not be reached".to_string(),
                },
            ),
            AppError::Decode(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "UPSTREAM_INVALID_RESPONSE".to_string(),
                    message: "Weather provider returned an unreadable response".to_string(),
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// What a failed request does to the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log and exit with status 1, dropping every open connection
    #[default]
    Terminate,
    /// Answer the failing request with a JSON error body
    Respond,
}

impl FailurePolicy {
    /// Apply the policy to a request failure
    pub fn resolve(self, err: AppError) -> Response {
        match self {
            FailurePolicy::Terminate => {
                tracing::error!(error = %err, "request failed, terminating");
                std::process::exit(1)
            }
            FailurePolicy::Respond => err.into_response(),
        }
    }
}
