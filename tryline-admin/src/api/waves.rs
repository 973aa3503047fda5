//! Wave listing and configuration handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tryline_common::db::models::{DistributionAlgorithm, Wave};

use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

/// Bounds for teams within one session
pub const MIN_TEAMS_PER_SESSION: i64 = 1;
pub const MAX_TEAMS_PER_SESSION: i64 = 6;

#[derive(Debug, Deserialize)]
pub struct WaveListQuery {
    pub cohort_id: String,
    pub season_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WaveConfigRequest {
    pub distribution_algorithm: DistributionAlgorithm,
    pub teams_per_session: i64,
}

pub fn validate_teams_per_session(teams_per_session: i64) -> ApiResult<()> {
    if !(MIN_TEAMS_PER_SESSION..=MAX_TEAMS_PER_SESSION).contains(&teams_per_session) {
        return Err(ApiError::BadRequest(format!(
            "teams_per_session must be between {} and {}",
            MIN_TEAMS_PER_SESSION, MAX_TEAMS_PER_SESSION
        )));
    }
    Ok(())
}

/// GET /api/waves?cohort_id=&season_id=
pub async fn list_waves(
    State(state): State<AppState>,
    Query(query): Query<WaveListQuery>,
) -> ApiResult<Json<Vec<Wave>>> {
    let waves = db::waves::list_waves(&state.db, &query.cohort_id, &query.season_id).await?;
    Ok(Json(waves))
}

/// PUT /api/waves/:id/config
///
/// Persist the wave's distribution configuration. Editable per wave at
/// any time before distribution runs.
pub async fn update_wave_config(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<WaveConfigRequest>,
) -> ApiResult<Json<Wave>> {
    validate_teams_per_session(request.teams_per_session)?;

    let updated = db::waves::update_wave_config(
        &state.db,
        &guid,
        request.distribution_algorithm,
        request.teams_per_session,
    )
    .await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("Wave not found: {}", guid)));
    }

    let wave = db::waves::get_wave(&state.db, &guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Wave not found: {}", guid)))?;
    Ok(Json(wave))
}
