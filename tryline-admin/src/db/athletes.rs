//! Athlete roster database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::Athlete;
use tryline_common::Result;

/// Count active-status athletes in a cohort for a season.
///
/// This is the live input to capacity planning — callers re-fetch it on
/// every planning operation rather than holding a count across edits.
pub async fn count_active(pool: &SqlitePool, cohort_id: &str, season_id: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM athletes
        WHERE cohort_id = ? AND season_id = ? AND status = 'active'
        "#,
    )
    .bind(cohort_id)
    .bind(season_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

pub async fn list_roster(pool: &SqlitePool, cohort_id: &str, season_id: &str) -> Result<Vec<Athlete>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, association_id, cohort_id, season_id, first_name, last_name,
               status, previous_level_id
        FROM athletes
        WHERE cohort_id = ? AND season_id = ?
        ORDER BY last_name, first_name
        "#,
    )
    .bind(cohort_id)
    .bind(season_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let status: String = row.get("status");
            Ok(Athlete {
                guid: row.get("guid"),
                association_id: row.get("association_id"),
                cohort_id: row.get("cohort_id"),
                season_id: row.get("season_id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                status: status.parse()?,
                previous_level_id: row.get("previous_level_id"),
            })
        })
        .collect()
}
