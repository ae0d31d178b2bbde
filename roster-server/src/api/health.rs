//! Health Check API Handlers
//!
//! Endpoints used by readiness and liveness probes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::store::StoreClient;

pub const SERVICE_NAME: &str = "Roster MongoDB CRUD Service";

/// GET /
/// Liveness check, independent of the store
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

/// GET /health
/// Readiness check; 503 while the store is disconnected
///
/// Answered without `ApiError`, which logs every 503 at error level.
pub async fn health_check(State(store): State<Arc<StoreClient>>) -> Response {
    if !store.is_connected() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Database not available" })),
        )
            .into_response();
    }

    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "database_status": "connected",
    }))
    .into_response()
}
