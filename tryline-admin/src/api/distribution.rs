//! Distribution hand-off handler
//!
//! Persists the wave's chosen configuration, then asks the remote
//! balancing service to place athletes into sessions/teams. The service's
//! placements are opaque here; only success or its error message comes
//! back.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tryline_common::db::models::DistributionAlgorithm;

use crate::api::waves::validate_teams_per_session;
use crate::error::{ApiError, ApiResult};
use crate::services::distribution::DistributionError;
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct DistributeWaveRequest {
    pub distribution_algorithm: DistributionAlgorithm,
    pub teams_per_session: i64,
}

#[derive(Debug, Serialize)]
pub struct DistributeWaveResponse {
    pub wave_id: String,
    pub distribution_algorithm: DistributionAlgorithm,
    pub teams_per_session: i64,
    pub distributed: bool,
}

/// POST /api/waves/:id/distribute
///
/// 409 while a distribution for the same wave is in flight. Partial
/// effects on the balancing side are not rolled back; re-running after a
/// failure is the recovery path.
pub async fn distribute_wave(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<DistributeWaveRequest>,
) -> ApiResult<Json<DistributeWaveResponse>> {
    validate_teams_per_session(request.teams_per_session)?;

    let wave = db::waves::get_wave(&state.db, &guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Wave not found: {}", guid)))?;

    let _token = state.distributing.try_begin(&wave.guid).ok_or_else(|| {
        ApiError::Conflict(format!("Distribution already running for wave {}", wave.guid))
    })?;

    // Persist the chosen configuration before invoking the procedure, so
    // the wave record and the balancing run never disagree
    db::waves::update_wave_config(
        &state.db,
        &wave.guid,
        request.distribution_algorithm,
        request.teams_per_session,
    )
    .await?;

    state
        .distribution
        .distribute(
            &wave.guid,
            request.distribution_algorithm,
            request.teams_per_session,
        )
        .await
        .map_err(|e| match e {
            DistributionError::Rejected(msg) => ApiError::Unprocessable(msg),
            other => ApiError::Internal(other.to_string()),
        })?;

    tracing::info!(
        wave_id = %wave.guid,
        algorithm = request.distribution_algorithm.as_str(),
        teams_per_session = request.teams_per_session,
        "Wave distribution requested"
    );

    Ok(Json(DistributeWaveResponse {
        wave_id: wave.guid,
        distribution_algorithm: request.distribution_algorithm,
        teams_per_session: request.teams_per_session,
        distributed: true,
    }))
}
