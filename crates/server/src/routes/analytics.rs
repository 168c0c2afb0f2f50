//! The analytics endpoint: fetch, aggregate, cache, respond.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use super::AppState;
use crate::error::ApiError;
use vacstat_core::{AnalyticsResult, aggregate};

/// `GET /analytics/:query`
///
/// The query is lowercased for the store key only; its original casing is
/// echoed in the payload. A stored result is returned unchanged apart from the
/// `cached` flag. On a miss the fetcher runs, the payload is computed, stored
/// (best effort) and returned with `cached: false`.
pub async fn analytics(
    State(state): State<Arc<AppState>>, Path(query): Path<String>,
) -> Result<Json<AnalyticsResult>, ApiError> {
    let key = query.to_lowercase();

    if let Ok(Some(stored)) = state.db.lookup_result(&key).await {
        match serde_json::from_str::<AnalyticsResult>(&stored) {
            Ok(mut result) => {
                tracing::debug!("cache hit for {:?}", key);
                result.cached = true;
                return Ok(Json(result));
            }
            Err(e) => tracing::warn!("discarding unreadable cache row for {:?}: {}", key, e),
        }
    }

    let outcome = state.fetcher.fetch(&query).await.map_err(vacstat_core::Error::from)?;
    if let Some(err) = &outcome.aborted {
        tracing::warn!(
            "fetch for {:?} aborted after {} pages ({}); serving partial result",
            query,
            outcome.pages_fetched,
            err
        );
    }

    let result = aggregate(&query, state.fetcher.source_name(), &outcome.vacancies, &state.rules);

    match serde_json::to_string(&result) {
        Ok(json) => {
            if let Err(e) = state.db.upsert_result(&key, &json).await {
                tracing::warn!("failed to store result for {:?}: {}", key, e);
            }
        }
        Err(e) => tracing::warn!("failed to serialize result for {:?}: {}", key, e),
    }

    Ok(Json(result))
}
