//! Session schedule handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tryline_common::db::models::{Session, SessionWithCounts};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub cohort_id: String,
    pub season_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub cohort_id: String,
    pub season_id: String,
    pub location_id: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub location_id: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: String,
}

/// Times are stored as "HH:MM" so lexicographic order is chronological
/// order; anything else would silently break session-to-wave bucketing.
fn validate_time(scheduled_time: &str) -> ApiResult<()> {
    NaiveTime::parse_from_str(scheduled_time, "%H:%M").map_err(|_| {
        ApiError::BadRequest(format!(
            "scheduled_time must be HH:MM, got: {}",
            scheduled_time
        ))
    })?;
    Ok(())
}

/// GET /api/sessions?cohort_id=&season_id=
///
/// Chronological schedule with display counts (drills, evaluators, intake
/// staff, enrolled players).
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> ApiResult<Json<Vec<SessionWithCounts>>> {
    let sessions =
        db::sessions::list_sessions_with_counts(&state.db, &query.cohort_id, &query.season_id)
            .await?;
    Ok(Json(sessions))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<Json<Session>> {
    validate_time(&request.scheduled_time)?;

    let session = Session {
        guid: Uuid::new_v4().to_string(),
        cohort_id: request.cohort_id,
        season_id: request.season_id,
        location_id: request.location_id,
        scheduled_date: request.scheduled_date,
        scheduled_time: request.scheduled_time,
        wave_id: None,
    };
    db::sessions::create_session(&state.db, &session).await?;

    Ok(Json(session))
}

/// PUT /api/sessions/:id
pub async fn update_session(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<UpdateSessionRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    validate_time(&request.scheduled_time)?;

    let updated = db::sessions::update_session_schedule(
        &state.db,
        &guid,
        request.location_id.as_deref(),
        request.scheduled_date,
        &request.scheduled_time,
    )
    .await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("Session not found: {}", guid)));
    }

    Ok(Json(serde_json::json!({ "guid": guid })))
}
