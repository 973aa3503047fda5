//! Previous-level ranking handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tryline_common::db::models::Level;
use uuid::Uuid;

use crate::api::AssociationQuery;
use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateLevelRequest {
    pub association_id: String,
    pub name: String,
    pub rank: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLevelRequest {
    pub name: String,
    pub rank: i64,
}

/// GET /api/levels?association_id=
pub async fn list_levels(
    State(state): State<AppState>,
    Query(query): Query<AssociationQuery>,
) -> ApiResult<Json<Vec<Level>>> {
    let levels = db::levels::list_levels(&state.db, &query.association_id).await?;
    Ok(Json(levels))
}

/// POST /api/levels
pub async fn create_level(
    State(state): State<AppState>,
    Json(request): Json<CreateLevelRequest>,
) -> ApiResult<Json<Level>> {
    let level = Level {
        guid: Uuid::new_v4().to_string(),
        association_id: request.association_id,
        name: request.name,
        rank: request.rank,
    };
    db::levels::create_level(&state.db, &level).await?;
    Ok(Json(level))
}

/// PUT /api/levels/:id
pub async fn update_level(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<UpdateLevelRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = db::levels::update_level(&state.db, &guid, &request.name, request.rank).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("Level not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({ "guid": guid })))
}

/// DELETE /api/levels/:id
pub async fn delete_level(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = db::levels::delete_level(&state.db, &guid).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Level not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({ "deleted": guid })))
}
