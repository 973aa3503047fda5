//! Wave planning handlers
//!
//! The plan overview recomputes capacity figures from live counts on every
//! request; nothing is cached between calls. Generation runs the full
//! provision-then-assign sequence behind a per-cohort in-flight guard.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tryline_common::db::models::{Cohort, SessionWithCounts, Wave};

use crate::error::{ApiError, ApiResult};
use crate::planning::{self, PlanSummary};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    /// Explicit season; defaults to the association's active season
    pub season_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GenerateWavesRequest {
    pub season_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanOverviewResponse {
    pub cohort: Cohort,
    pub season_id: String,
    /// Live count of active athletes; re-fetched on every request
    pub player_count: i64,
    /// Planning aid only - recomputed here, never persisted
    pub sessions_per_wave: i64,
    pub waves: Vec<Wave>,
    pub sessions: Vec<SessionWithCounts>,
}

#[derive(Debug, Serialize)]
pub struct GenerateWavesResponse {
    pub cohort_id: String,
    pub season_id: String,
    #[serde(flatten)]
    pub summary: PlanSummary,
}

/// Resolve the season a planning operation targets: the explicit one if
/// given, otherwise the association's active season.
async fn resolve_season(
    state: &AppState,
    cohort: &Cohort,
    explicit: Option<String>,
) -> ApiResult<String> {
    if let Some(season_id) = explicit {
        return Ok(season_id);
    }
    let season = db::seasons::active_season(&state.db, &cohort.association_id)
        .await?
        .ok_or_else(|| {
            ApiError::Unprocessable(format!(
                "Association {} has no active season; activate one before planning waves",
                cohort.association_id
            ))
        })?;
    Ok(season.guid)
}

async fn load_cohort(state: &AppState, guid: &str) -> ApiResult<Cohort> {
    db::cohorts::get_cohort(&state.db, guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Cohort not found: {}", guid)))
}

/// GET /api/cohorts/:id/plan
///
/// Planning overview: live athlete count, derived sessions-per-wave, and
/// the cohort's waves and sessions for the target season.
pub async fn get_plan_overview(
    State(state): State<AppState>,
    Path(cohort_id): Path<String>,
    Query(query): Query<PlanQuery>,
) -> ApiResult<Json<PlanOverviewResponse>> {
    let cohort = load_cohort(&state, &cohort_id).await?;
    let season_id = resolve_season(&state, &cohort, query.season_id).await?;

    let player_count = db::athletes::count_active(&state.db, &cohort.guid, &season_id).await?;
    let sessions_per_wave =
        planning::capacity::sessions_per_wave(player_count, cohort.session_capacity);
    let waves = db::waves::list_waves(&state.db, &cohort.guid, &season_id).await?;
    let sessions =
        db::sessions::list_sessions_with_counts(&state.db, &cohort.guid, &season_id).await?;

    Ok(Json(PlanOverviewResponse {
        cohort,
        season_id,
        player_count,
        sessions_per_wave,
        waves,
        sessions,
    }))
}

/// POST /api/cohorts/:id/waves/generate
///
/// Provision missing standard waves and assign sessions to waves. 409
/// while a previous generation for the same cohort is still running. When
/// sessions-per-wave is not computable (zero capacity or empty roster),
/// waves are still provisioned and the response reports the assignment as
/// `not_computable` instead of guessing wave numbers.
pub async fn generate_waves(
    State(state): State<AppState>,
    Path(cohort_id): Path<String>,
    Json(request): Json<GenerateWavesRequest>,
) -> ApiResult<Json<GenerateWavesResponse>> {
    let cohort = load_cohort(&state, &cohort_id).await?;
    let season_id = resolve_season(&state, &cohort, request.season_id).await?;

    // Held until this handler returns; re-entrant generation for the same
    // cohort gets a 409 instead of racing the provisioner
    let _token = state.generating.try_begin(&cohort.guid).ok_or_else(|| {
        ApiError::Conflict(format!(
            "Wave generation already running for cohort {}",
            cohort.guid
        ))
    })?;

    let summary = planning::generate_wave_plan(&state.db, &cohort, &season_id).await?;

    Ok(Json(GenerateWavesResponse {
        cohort_id: cohort.guid,
        season_id,
        summary,
    }))
}
