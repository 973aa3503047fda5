//! Position type handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tryline_common::db::models::PositionType;
use uuid::Uuid;

use crate::api::AssociationQuery;
use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct CreatePositionRequest {
    pub association_id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePositionRequest {
    pub name: String,
    pub sort_order: i64,
}

/// GET /api/positions?association_id=
pub async fn list_positions(
    State(state): State<AppState>,
    Query(query): Query<AssociationQuery>,
) -> ApiResult<Json<Vec<PositionType>>> {
    let positions = db::positions::list_positions(&state.db, &query.association_id).await?;
    Ok(Json(positions))
}

/// POST /api/positions
pub async fn create_position(
    State(state): State<AppState>,
    Json(request): Json<CreatePositionRequest>,
) -> ApiResult<Json<PositionType>> {
    let position = PositionType {
        guid: Uuid::new_v4().to_string(),
        association_id: request.association_id,
        name: request.name,
        sort_order: request.sort_order,
    };
    db::positions::create_position(&state.db, &position).await?;
    Ok(Json(position))
}

/// PUT /api/positions/:id
pub async fn update_position(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<UpdatePositionRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated =
        db::positions::update_position(&state.db, &guid, &request.name, request.sort_order).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("Position not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({ "guid": guid })))
}

/// DELETE /api/positions/:id
pub async fn delete_position(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = db::positions::delete_position(&state.db, &guid).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Position not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({ "deleted": guid })))
}
