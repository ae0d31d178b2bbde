//! API Module
//!
//! HTTP API layer for the service.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod extract;
pub mod health;
pub mod soldier;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::store::StoreClient;

/// Create the main API router with all endpoints
pub fn create_router(store: Arc<StoreClient>) -> Router {
    Router::new()
        // Health checks
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Soldier endpoints, with and without the trailing slash
        .route(
            "/soldiersdb",
            get(soldier::list_soldiers).post(soldier::create_soldier),
        )
        .route(
            "/soldiersdb/",
            get(soldier::list_soldiers).post(soldier::create_soldier),
        )
        .route(
            "/soldiersdb/{id}",
            get(soldier::get_soldier)
                .put(soldier::update_soldier)
                .delete(soldier::delete_soldier),
        )
        // Add state and middleware
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}
