//! Error types for oac-feed
//!
//! Unresolvable rows never surface here; only request-level failures do.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::sheets::FetchError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// A sheet could not be fetched (502)
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(#[from] FetchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::UpstreamFetch(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_FETCH"),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
