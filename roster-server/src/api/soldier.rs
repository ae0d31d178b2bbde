//! Soldier API Handlers
//!
//! HTTP endpoints for soldier records. Handlers validate input before the
//! store is touched and are the only place an empty repository result turns
//! into a 404.

use axum::{Json, extract::State, http::StatusCode};
use roster_core::domain::soldier::Soldier;
use roster_core::dto::soldier::{CreateSoldier, UpdateSoldier};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{ValidJson, ValidPath};
use crate::repository::soldier_repository;
use crate::store::StoreClient;

/// Rejects ids that cannot name a soldier
pub fn validate_soldier_id(id: i64) -> ApiResult<i64> {
    if id <= 0 {
        return Err(ApiError::Validation(
            "Soldier ID must be a positive integer".to_string(),
        ));
    }
    Ok(id)
}

/// POST /soldiersdb/
/// Create a new soldier
pub async fn create_soldier(
    State(store): State<Arc<StoreClient>>,
    ValidJson(req): ValidJson<CreateSoldier>,
) -> ApiResult<(StatusCode, Json<Soldier>)> {
    req.validate()?;
    tracing::info!("Attempting to create soldier with ID {}", req.soldier_id);

    let soldier = soldier_repository::create(&store, req).await?;

    Ok((StatusCode::CREATED, Json(soldier)))
}

/// GET /soldiersdb/
/// List all soldiers
pub async fn list_soldiers(State(store): State<Arc<StoreClient>>) -> ApiResult<Json<Vec<Soldier>>> {
    tracing::debug!("Listing all soldiers");

    let soldiers = soldier_repository::list_all(&store).await?;

    Ok(Json(soldiers))
}

/// GET /soldiersdb/{id}
/// Get a soldier by business key
pub async fn get_soldier(
    State(store): State<Arc<StoreClient>>,
    ValidPath(id): ValidPath<i64>,
) -> ApiResult<Json<Soldier>> {
    let id = validate_soldier_id(id)?;
    tracing::debug!("Getting soldier: {}", id);

    let soldier = soldier_repository::find_by_id(&store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Soldier with ID {} not found", id)))?;

    Ok(Json(soldier))
}

/// PUT /soldiersdb/{id}
/// Partially update a soldier
pub async fn update_soldier(
    State(store): State<Arc<StoreClient>>,
    ValidPath(id): ValidPath<i64>,
    ValidJson(req): ValidJson<UpdateSoldier>,
) -> ApiResult<Json<Soldier>> {
    let id = validate_soldier_id(id)?;
    req.validate()?;
    tracing::info!("Attempting to update soldier with ID {}", id);

    let soldier = soldier_repository::update(&store, id, &req)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Soldier with ID {} not found to update", id))
        })?;

    Ok(Json(soldier))
}

/// DELETE /soldiersdb/{id}
/// Delete a soldier
pub async fn delete_soldier(
    State(store): State<Arc<StoreClient>>,
    ValidPath(id): ValidPath<i64>,
) -> ApiResult<StatusCode> {
    let id = validate_soldier_id(id)?;
    tracing::info!("Deleting soldier: {}", id);

    if !soldier_repository::delete(&store, id).await? {
        return Err(ApiError::NotFound(format!(
            "Soldier with ID {} not found to delete",
            id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
