//! User invitation database operations
//!
//! Email delivery is handled by an external collaborator; these rows only
//! track who was invited and where the invitation stands.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tryline_common::db::models::{Invitation, InvitationStatus};
use tryline_common::{Error, Result};

fn invitation_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Invitation> {
    let status: String = row.get("status");
    let invited_at: String = row.get("invited_at");
    let invited_at = DateTime::parse_from_rfc3339(&invited_at)
        .map_err(|e| Error::Internal(format!("Failed to parse invited_at: {}", e)))?
        .with_timezone(&Utc);
    let responded_at: Option<String> = row.get("responded_at");
    let responded_at = responded_at
        .map(|s| DateTime::parse_from_rfc3339(&s))
        .transpose()
        .map_err(|e| Error::Internal(format!("Failed to parse responded_at: {}", e)))?
        .map(|dt| dt.with_timezone(&Utc));

    Ok(Invitation {
        guid: row.get("guid"),
        association_id: row.get("association_id"),
        email: row.get("email"),
        role: row.get("role"),
        status: status.parse()?,
        invited_at,
        responded_at,
    })
}

pub async fn list_invitations(pool: &SqlitePool, association_id: &str) -> Result<Vec<Invitation>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, association_id, email, role, status, invited_at, responded_at
        FROM invitations
        WHERE association_id = ?
        ORDER BY invited_at DESC
        "#,
    )
    .bind(association_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(invitation_from_row).collect()
}

pub async fn create_invitation(pool: &SqlitePool, invitation: &Invitation) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO invitations (guid, association_id, email, role, status, invited_at, responded_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&invitation.guid)
    .bind(&invitation.association_id)
    .bind(&invitation.email)
    .bind(&invitation.role)
    .bind(invitation.status.as_str())
    .bind(invitation.invited_at.to_rfc3339())
    .bind(invitation.responded_at.map(|dt| dt.to_rfc3339()))
    .execute(pool)
    .await?;

    Ok(())
}

/// Move an invitation to a new status, stamping the response time;
/// returns rows affected
pub async fn update_invitation_status(
    pool: &SqlitePool,
    guid: &str,
    status: InvitationStatus,
) -> Result<u64> {
    let result = sqlx::query("UPDATE invitations SET status = ?, responded_at = ? WHERE guid = ?")
        .bind(status.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
