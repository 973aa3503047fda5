//! Season database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::{Season, SeasonStatus};
use tryline_common::Result;

fn season_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Season> {
    let status: String = row.get("status");
    Ok(Season {
        guid: row.get("guid"),
        association_id: row.get("association_id"),
        name: row.get("name"),
        status: status.parse()?,
        starts_on: row.get("starts_on"),
        ends_on: row.get("ends_on"),
    })
}

/// Fetch the active season for an association; at most one is expected.
/// Wave and session operations are meaningful only against this season.
pub async fn active_season(pool: &SqlitePool, association_id: &str) -> Result<Option<Season>> {
    let row = sqlx::query(
        r#"
        SELECT guid, association_id, name, status, starts_on, ends_on
        FROM seasons
        WHERE association_id = ? AND status = 'active'
        LIMIT 1
        "#,
    )
    .bind(association_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(season_from_row).transpose()
}

pub async fn list_seasons(pool: &SqlitePool, association_id: &str) -> Result<Vec<Season>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, association_id, name, status, starts_on, ends_on
        FROM seasons
        WHERE association_id = ?
        ORDER BY starts_on DESC
        "#,
    )
    .bind(association_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(season_from_row).collect()
}

pub async fn create_season(pool: &SqlitePool, season: &Season) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO seasons (guid, association_id, name, status, starts_on, ends_on)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&season.guid)
    .bind(&season.association_id)
    .bind(&season.name)
    .bind(season.status.as_str())
    .bind(season.starts_on)
    .bind(season.ends_on)
    .execute(pool)
    .await?;

    Ok(())
}

/// Set a season's lifecycle status; returns rows affected
pub async fn update_season_status(
    pool: &SqlitePool,
    guid: &str,
    status: SeasonStatus,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE seasons SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(status.as_str())
    .bind(guid)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
