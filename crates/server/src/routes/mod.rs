//! Route registration and shared request state.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use vacstat_client::VacancyFetcher;
use vacstat_core::{CacheDb, SalaryRules};

pub mod analytics;
pub mod cache;
pub mod root;

/// Everything a request handler needs, constructed once at startup.
pub struct AppState {
    pub db: CacheDb,
    pub fetcher: Box<dyn VacancyFetcher>,
    pub rules: SalaryRules,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/analytics/:query", get(analytics::analytics))
        .route("/cache/stats", get(cache::stats))
        .route("/cache", delete(cache::clear))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
