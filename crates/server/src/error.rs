//! Error-to-response mapping for the HTTP surface.
//!
//! Every failure surfaces as HTTP 500 with a `{"detail": ...}` body; extraction
//! finding nothing is not a failure and never reaches this type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Wrapper turning the core error type into an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] vacstat_core::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self.0);
        let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
