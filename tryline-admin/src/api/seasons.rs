//! Season management handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tryline_common::db::models::{Season, SeasonStatus};
use uuid::Uuid;

use crate::api::AssociationQuery;
use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateSeasonRequest {
    pub association_id: String,
    pub name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    #[serde(default = "default_status")]
    pub status: SeasonStatus,
}

fn default_status() -> SeasonStatus {
    SeasonStatus::Draft
}

#[derive(Debug, Deserialize)]
pub struct UpdateSeasonStatusRequest {
    pub status: SeasonStatus,
}

/// GET /api/seasons?association_id=
pub async fn list_seasons(
    State(state): State<AppState>,
    Query(query): Query<AssociationQuery>,
) -> ApiResult<Json<Vec<Season>>> {
    let seasons = db::seasons::list_seasons(&state.db, &query.association_id).await?;
    Ok(Json(seasons))
}

/// GET /api/seasons/active?association_id=
///
/// The single active season, against which wave and session operations
/// are meaningful. 404 when the association has none.
pub async fn get_active_season(
    State(state): State<AppState>,
    Query(query): Query<AssociationQuery>,
) -> ApiResult<Json<Season>> {
    let season = db::seasons::active_season(&state.db, &query.association_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No active season for association {}",
                query.association_id
            ))
        })?;
    Ok(Json(season))
}

/// POST /api/seasons
pub async fn create_season(
    State(state): State<AppState>,
    Json(request): Json<CreateSeasonRequest>,
) -> ApiResult<Json<Season>> {
    if request.ends_on < request.starts_on {
        return Err(ApiError::BadRequest(
            "Season cannot end before it starts".to_string(),
        ));
    }

    let season = Season {
        guid: Uuid::new_v4().to_string(),
        association_id: request.association_id,
        name: request.name,
        status: request.status,
        starts_on: request.starts_on,
        ends_on: request.ends_on,
    };
    db::seasons::create_season(&state.db, &season).await?;

    Ok(Json(season))
}

/// PUT /api/seasons/:id/status
pub async fn update_season_status(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<UpdateSeasonStatusRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = db::seasons::update_season_status(&state.db, &guid, request.status).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("Season not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({
        "guid": guid,
        "status": request.status,
    })))
}
