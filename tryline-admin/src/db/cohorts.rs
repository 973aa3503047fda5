//! Cohort database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::Cohort;
use tryline_common::Result;

fn cohort_from_row(row: &sqlx::sqlite::SqliteRow) -> Cohort {
    Cohort {
        guid: row.get("guid"),
        association_id: row.get("association_id"),
        name: row.get("name"),
        session_capacity: row.get("session_capacity"),
        sessions_per_cohort: row.get("sessions_per_cohort"),
        sort_order: row.get("sort_order"),
        active: row.get("active"),
    }
}

/// List active cohorts for an association, ordered by sort order then name
pub async fn list_cohorts(pool: &SqlitePool, association_id: &str) -> Result<Vec<Cohort>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, association_id, name, session_capacity, sessions_per_cohort, sort_order, active
        FROM cohorts
        WHERE association_id = ? AND active = 1
        ORDER BY sort_order, name
        "#,
    )
    .bind(association_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(cohort_from_row).collect())
}

pub async fn get_cohort(pool: &SqlitePool, guid: &str) -> Result<Option<Cohort>> {
    let row = sqlx::query(
        r#"
        SELECT guid, association_id, name, session_capacity, sessions_per_cohort, sort_order, active
        FROM cohorts
        WHERE guid = ?
        "#,
    )
    .bind(guid)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(cohort_from_row))
}

pub async fn create_cohort(pool: &SqlitePool, cohort: &Cohort) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO cohorts (guid, association_id, name, session_capacity, sessions_per_cohort, sort_order, active)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&cohort.guid)
    .bind(&cohort.association_id)
    .bind(&cohort.name)
    .bind(cohort.session_capacity)
    .bind(cohort.sessions_per_cohort)
    .bind(cohort.sort_order)
    .bind(cohort.active)
    .execute(pool)
    .await?;

    Ok(())
}

/// Update cohort configuration; returns the number of rows affected
/// (0 when the cohort does not exist)
pub async fn update_cohort(pool: &SqlitePool, cohort: &Cohort) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE cohorts
        SET name = ?, session_capacity = ?, sessions_per_cohort = ?, sort_order = ?,
            active = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&cohort.name)
    .bind(cohort.session_capacity)
    .bind(cohort.sessions_per_cohort)
    .bind(cohort.sort_order)
    .bind(cohort.active)
    .bind(&cohort.guid)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_cohort(pool: &SqlitePool, guid: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM cohorts WHERE guid = ?")
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
