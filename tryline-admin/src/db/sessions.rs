//! Evaluation session database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::{Session, SessionWithCounts};
use tryline_common::Result;

fn session_from_row(row: &sqlx::sqlite::SqliteRow) -> Session {
    Session {
        guid: row.get("guid"),
        cohort_id: row.get("cohort_id"),
        season_id: row.get("season_id"),
        location_id: row.get("location_id"),
        scheduled_date: row.get("scheduled_date"),
        scheduled_time: row.get("scheduled_time"),
        wave_id: row.get("wave_id"),
    }
}

/// List sessions for a cohort/season in chronological order.
///
/// This ordering defines each session's position for wave assignment, so
/// it must match the ordering the schedule view shows.
pub async fn list_sessions(pool: &SqlitePool, cohort_id: &str, season_id: &str) -> Result<Vec<Session>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, cohort_id, season_id, location_id, scheduled_date, scheduled_time, wave_id
        FROM sessions
        WHERE cohort_id = ? AND season_id = ?
        ORDER BY scheduled_date, scheduled_time
        "#,
    )
    .bind(cohort_id)
    .bind(season_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(session_from_row).collect())
}

/// List sessions with the aggregated display counts (drills, evaluators,
/// intake staff, enrolled players)
pub async fn list_sessions_with_counts(
    pool: &SqlitePool,
    cohort_id: &str,
    season_id: &str,
) -> Result<Vec<SessionWithCounts>> {
    let rows = sqlx::query(
        r#"
        SELECT s.guid, s.cohort_id, s.season_id, s.location_id,
               s.scheduled_date, s.scheduled_time, s.wave_id,
               (SELECT COUNT(*) FROM session_drills d WHERE d.session_id = s.guid) AS drill_count,
               (SELECT COUNT(*) FROM session_staff st WHERE st.session_id = s.guid AND st.role = 'evaluator') AS evaluator_count,
               (SELECT COUNT(*) FROM session_staff st WHERE st.session_id = s.guid AND st.role = 'intake') AS intake_count,
               (SELECT COUNT(*) FROM session_enrollments e WHERE e.session_id = s.guid) AS enrolled_count
        FROM sessions s
        WHERE s.cohort_id = ? AND s.season_id = ?
        ORDER BY s.scheduled_date, s.scheduled_time
        "#,
    )
    .bind(cohort_id)
    .bind(season_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| SessionWithCounts {
            session: session_from_row(row),
            drill_count: row.get("drill_count"),
            evaluator_count: row.get("evaluator_count"),
            intake_count: row.get("intake_count"),
            enrolled_count: row.get("enrolled_count"),
        })
        .collect())
}

pub async fn create_session(pool: &SqlitePool, session: &Session) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sessions (guid, cohort_id, season_id, location_id,
                              scheduled_date, scheduled_time, wave_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&session.guid)
    .bind(&session.cohort_id)
    .bind(&session.season_id)
    .bind(&session.location_id)
    .bind(session.scheduled_date)
    .bind(&session.scheduled_time)
    .bind(&session.wave_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Reschedule a session; returns rows affected
pub async fn update_session_schedule(
    pool: &SqlitePool,
    guid: &str,
    location_id: Option<&str>,
    scheduled_date: chrono::NaiveDate,
    scheduled_time: &str,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET location_id = ?, scheduled_date = ?, scheduled_time = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(location_id)
    .bind(scheduled_date)
    .bind(scheduled_time)
    .bind(guid)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Single-row wave assignment update keyed by session guid.
///
/// Each call targets a disjoint row; the assigner issues several of these
/// concurrently and tolerates individual failures.
pub async fn set_session_wave(pool: &SqlitePool, guid: &str, wave_id: &str) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE sessions SET wave_id = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(wave_id)
    .bind(guid)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
