//! Location handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tryline_common::db::models::Location;
use uuid::Uuid;

use crate::api::AssociationQuery;
use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub association_id: String,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub name: String,
    pub address: Option<String>,
}

/// GET /api/locations?association_id=
pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<AssociationQuery>,
) -> ApiResult<Json<Vec<Location>>> {
    let locations = db::locations::list_locations(&state.db, &query.association_id).await?;
    Ok(Json(locations))
}

/// POST /api/locations
pub async fn create_location(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> ApiResult<Json<Location>> {
    let location = Location {
        guid: Uuid::new_v4().to_string(),
        association_id: request.association_id,
        name: request.name,
        address: request.address,
    };
    db::locations::create_location(&state.db, &location).await?;
    Ok(Json(location))
}

/// PUT /api/locations/:id
pub async fn update_location(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<UpdateLocationRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = db::locations::update_location(
        &state.db,
        &guid,
        &request.name,
        request.address.as_deref(),
    )
    .await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("Location not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({ "guid": guid })))
}

/// DELETE /api/locations/:id
pub async fn delete_location(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = db::locations::delete_location(&state.db, &guid).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Location not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({ "deleted": guid })))
}
