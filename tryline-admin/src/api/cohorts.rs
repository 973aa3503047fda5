//! Cohort management handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tryline_common::db::models::Cohort;
use uuid::Uuid;

use crate::api::AssociationQuery;
use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateCohortRequest {
    pub association_id: String,
    pub name: String,
    #[serde(default)]
    pub session_capacity: i64,
    #[serde(default = "default_sessions_per_cohort")]
    pub sessions_per_cohort: i64,
    #[serde(default)]
    pub sort_order: i64,
}

fn default_sessions_per_cohort() -> i64 {
    1
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateCohortRequest {
    pub name: String,
    pub session_capacity: i64,
    pub sessions_per_cohort: i64,
    pub sort_order: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn validate_cohort_numbers(session_capacity: i64, sessions_per_cohort: i64) -> ApiResult<()> {
    if session_capacity < 0 {
        return Err(ApiError::BadRequest(
            "session_capacity must not be negative".to_string(),
        ));
    }
    if sessions_per_cohort < 0 {
        return Err(ApiError::BadRequest(
            "sessions_per_cohort must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/cohorts?association_id=
pub async fn list_cohorts(
    State(state): State<AppState>,
    Query(query): Query<AssociationQuery>,
) -> ApiResult<Json<Vec<Cohort>>> {
    let cohorts = db::cohorts::list_cohorts(&state.db, &query.association_id).await?;
    Ok(Json(cohorts))
}

/// POST /api/cohorts
pub async fn create_cohort(
    State(state): State<AppState>,
    Json(request): Json<CreateCohortRequest>,
) -> ApiResult<Json<Cohort>> {
    validate_cohort_numbers(request.session_capacity, request.sessions_per_cohort)?;

    let cohort = Cohort {
        guid: Uuid::new_v4().to_string(),
        association_id: request.association_id,
        name: request.name,
        session_capacity: request.session_capacity,
        sessions_per_cohort: request.sessions_per_cohort,
        sort_order: request.sort_order,
        active: true,
    };
    db::cohorts::create_cohort(&state.db, &cohort).await?;

    Ok(Json(cohort))
}

/// PUT /api/cohorts/:id
pub async fn update_cohort(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<UpdateCohortRequest>,
) -> ApiResult<Json<Cohort>> {
    validate_cohort_numbers(request.session_capacity, request.sessions_per_cohort)?;

    let existing = db::cohorts::get_cohort(&state.db, &guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Cohort not found: {}", guid)))?;

    let cohort = Cohort {
        guid,
        association_id: existing.association_id,
        name: request.name,
        session_capacity: request.session_capacity,
        sessions_per_cohort: request.sessions_per_cohort,
        sort_order: request.sort_order,
        active: request.active,
    };
    db::cohorts::update_cohort(&state.db, &cohort).await?;

    Ok(Json(cohort))
}

/// DELETE /api/cohorts/:id
pub async fn delete_cohort(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = db::cohorts::delete_cohort(&state.db, &guid).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Cohort not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({ "deleted": guid })))
}
