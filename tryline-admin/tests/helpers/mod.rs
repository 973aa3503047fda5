//! Shared test helpers: temp database setup and row seeding
#![allow(dead_code)]

use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tempfile::TempDir;
use tryline_admin::services::DistributionClient;
use tryline_admin::{build_router, AppState};
use tryline_common::config::BalancingConfig;
use uuid::Uuid;

/// Create a fresh database in a temp folder. The TempDir must stay alive
/// for the duration of the test.
pub async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let db_path = dir.path().join("tryline.db");
    let pool = tryline_common::db::init_database(&db_path)
        .await
        .expect("Should initialize test database");
    (dir, pool)
}

/// Build the app router over a test database. The balancing client points
/// at a default localhost URL no test actually calls.
pub fn setup_app(pool: SqlitePool) -> axum::Router {
    let distribution = DistributionClient::new(&BalancingConfig::default())
        .expect("Should build balancing client");
    let state = AppState::new(pool, distribution);
    build_router(state)
}

pub async fn seed_association(pool: &SqlitePool) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO associations (guid, name) VALUES (?, ?)")
        .bind(&guid)
        .bind("Test Association")
        .execute(pool)
        .await
        .unwrap();
    guid
}

pub async fn seed_season(pool: &SqlitePool, association_id: &str, status: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO seasons (guid, association_id, name, status, starts_on, ends_on)
         VALUES (?, ?, 'Spring Evaluations', ?, '2026-03-01', '2026-05-31')",
    )
    .bind(&guid)
    .bind(association_id)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
    guid
}

pub async fn seed_cohort(
    pool: &SqlitePool,
    association_id: &str,
    name: &str,
    session_capacity: i64,
    sessions_per_cohort: i64,
) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO cohorts (guid, association_id, name, session_capacity, sessions_per_cohort)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(association_id)
    .bind(name)
    .bind(session_capacity)
    .bind(sessions_per_cohort)
    .execute(pool)
    .await
    .unwrap();
    guid
}

pub async fn seed_athletes(
    pool: &SqlitePool,
    association_id: &str,
    cohort_id: &str,
    season_id: &str,
    count: usize,
    status: &str,
) {
    for i in 0..count {
        sqlx::query(
            "INSERT INTO athletes (guid, association_id, cohort_id, season_id,
                                   first_name, last_name, status)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(association_id)
        .bind(cohort_id)
        .bind(season_id)
        .bind(format!("First{}", i))
        .bind(format!("Last{}", i))
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub async fn seed_session(
    pool: &SqlitePool,
    cohort_id: &str,
    season_id: &str,
    scheduled_date: &str,
    scheduled_time: &str,
) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO sessions (guid, cohort_id, season_id, scheduled_date, scheduled_time)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(cohort_id)
    .bind(season_id)
    .bind(scheduled_date)
    .bind(scheduled_time)
    .execute(pool)
    .await
    .unwrap();
    guid
}

/// Map of standard wave number to wave guid for a cohort/season
pub async fn wave_map(pool: &SqlitePool, cohort_id: &str, season_id: &str) -> HashMap<i64, String> {
    let rows = sqlx::query(
        "SELECT wave_number, guid FROM waves
         WHERE cohort_id = ? AND season_id = ? AND wave_number IS NOT NULL",
    )
    .bind(cohort_id)
    .bind(season_id)
    .fetch_all(pool)
    .await
    .unwrap();

    rows.iter()
        .map(|row| (row.get::<i64, _>("wave_number"), row.get::<String, _>("guid")))
        .collect()
}

pub async fn session_wave(pool: &SqlitePool, session_guid: &str) -> Option<String> {
    sqlx::query_scalar("SELECT wave_id FROM sessions WHERE guid = ?")
        .bind(session_guid)
        .fetch_one(pool)
        .await
        .unwrap()
}
