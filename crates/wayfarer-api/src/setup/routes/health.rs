//! Health check endpoint.

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. The store and storage layers have no connections to
/// verify, so reachability of the process is the whole check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "wayfarer-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
