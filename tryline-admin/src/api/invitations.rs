//! User invitation handlers
//!
//! Creates and tracks invitation rows; delivery of the invitation email is
//! an external collaborator's concern.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tryline_common::db::models::{Invitation, InvitationStatus};
use uuid::Uuid;

use crate::api::AssociationQuery;
use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

const INVITATION_ROLES: [&str; 3] = ["admin", "evaluator", "intake"];

#[derive(Debug, Deserialize)]
pub struct CreateInvitationRequest {
    pub association_id: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvitationStatusRequest {
    pub status: InvitationStatus,
}

/// GET /api/invitations?association_id=
pub async fn list_invitations(
    State(state): State<AppState>,
    Query(query): Query<AssociationQuery>,
) -> ApiResult<Json<Vec<Invitation>>> {
    let invitations = db::invitations::list_invitations(&state.db, &query.association_id).await?;
    Ok(Json(invitations))
}

/// POST /api/invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    Json(request): Json<CreateInvitationRequest>,
) -> ApiResult<Json<Invitation>> {
    if !request.email.contains('@') {
        return Err(ApiError::BadRequest(format!(
            "Not an email address: {}",
            request.email
        )));
    }
    if !INVITATION_ROLES.contains(&request.role.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Unknown invitation role: {}",
            request.role
        )));
    }

    let invitation = Invitation {
        guid: Uuid::new_v4().to_string(),
        association_id: request.association_id,
        email: request.email,
        role: request.role,
        status: InvitationStatus::Pending,
        invited_at: Utc::now(),
        responded_at: None,
    };
    db::invitations::create_invitation(&state.db, &invitation).await?;

    Ok(Json(invitation))
}

/// PUT /api/invitations/:id/status
pub async fn update_invitation_status(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(request): Json<UpdateInvitationStatusRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated =
        db::invitations::update_invitation_status(&state.db, &guid, request.status).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("Invitation not found: {}", guid)));
    }
    Ok(Json(serde_json::json!({
        "guid": guid,
        "status": request.status,
    })))
}
