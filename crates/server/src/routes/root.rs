//! Liveness endpoint.

use axum::Json;

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "HH Analytics API работает!",
        "service": "vacstat",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
