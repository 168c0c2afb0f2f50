//! Store inspection and manual clearing.
//!
//! Stored results never expire on their own; these endpoints are the only
//! lifecycle management the store has.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use super::AppState;
use crate::error::ApiError;

/// `GET /cache/stats`
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = state.db.result_count().await?;
    Ok(Json(serde_json::json!({ "entries": entries })))
}

/// `DELETE /cache`
pub async fn clear(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.db.clear_results().await?;
    tracing::info!("cleared {} stored results", deleted);
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
