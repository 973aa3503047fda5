//! Database initialization
//!
//! Creates the database on first run and brings the schema up to date.
//! Every `create_*_table` uses CREATE TABLE IF NOT EXISTS, so
//! `init_database` is safe to call from any service at any time.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL allows concurrent readers with one writer; the assigner issues
    // several independent session updates at once
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    // Migrations (idempotent - safe to call multiple times)
    create_associations_table(&pool).await?;
    create_seasons_table(&pool).await?;
    create_cohorts_table(&pool).await?;
    create_levels_table(&pool).await?;
    create_locations_table(&pool).await?;
    create_position_types_table(&pool).await?;
    create_athletes_table(&pool).await?;
    create_waves_table(&pool).await?;
    create_sessions_table(&pool).await?;
    create_session_detail_tables(&pool).await?;
    create_invitations_table(&pool).await?;

    Ok(pool)
}

async fn create_associations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS associations (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_seasons_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS seasons (
            guid TEXT PRIMARY KEY,
            association_id TEXT NOT NULL REFERENCES associations(guid),
            name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft',
            starts_on TEXT NOT NULL,
            ends_on TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_cohorts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cohorts (
            guid TEXT PRIMARY KEY,
            association_id TEXT NOT NULL REFERENCES associations(guid),
            name TEXT NOT NULL,
            session_capacity INTEGER NOT NULL DEFAULT 0,
            sessions_per_cohort INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_levels_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS levels (
            guid TEXT PRIMARY KEY,
            association_id TEXT NOT NULL REFERENCES associations(guid),
            name TEXT NOT NULL,
            rank INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_locations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            guid TEXT PRIMARY KEY,
            association_id TEXT NOT NULL REFERENCES associations(guid),
            name TEXT NOT NULL,
            address TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_position_types_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS position_types (
            guid TEXT PRIMARY KEY,
            association_id TEXT NOT NULL REFERENCES associations(guid),
            name TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_athletes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS athletes (
            guid TEXT PRIMARY KEY,
            association_id TEXT NOT NULL REFERENCES associations(guid),
            cohort_id TEXT NOT NULL REFERENCES cohorts(guid),
            season_id TEXT NOT NULL REFERENCES seasons(guid),
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            previous_level_id TEXT REFERENCES levels(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_athletes_cohort_season
        ON athletes (cohort_id, season_id, status)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_waves_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS waves (
            guid TEXT PRIMARY KEY,
            cohort_id TEXT NOT NULL REFERENCES cohorts(guid),
            season_id TEXT NOT NULL REFERENCES seasons(guid),
            wave_number INTEGER,
            name TEXT,
            wave_type TEXT NOT NULL DEFAULT 'standard',
            status TEXT NOT NULL DEFAULT 'not_started',
            distribution_algorithm TEXT NOT NULL DEFAULT 'alphabetical',
            teams_per_session INTEGER NOT NULL DEFAULT 2,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Standard waves are addressed by (cohort, season, number); concurrent
    // provisioning of the same number must conflict here, not merge.
    // SQLite permits multiple NULL wave_numbers, so custom waves are exempt.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_waves_cohort_season_number
        ON waves (cohort_id, season_id, wave_number)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            guid TEXT PRIMARY KEY,
            cohort_id TEXT NOT NULL REFERENCES cohorts(guid),
            season_id TEXT NOT NULL REFERENCES seasons(guid),
            location_id TEXT REFERENCES locations(guid),
            scheduled_date TEXT NOT NULL,
            scheduled_time TEXT NOT NULL,
            wave_id TEXT REFERENCES waves(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sessions_cohort_season
        ON sessions (cohort_id, season_id, scheduled_date, scheduled_time)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Tables backing the per-session display counts (drills, evaluators,
/// intake staff, enrolled players)
async fn create_session_detail_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS session_enrollments (
            session_id TEXT NOT NULL REFERENCES sessions(guid),
            athlete_id TEXT NOT NULL REFERENCES athletes(guid),
            PRIMARY KEY (session_id, athlete_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS session_staff (
            session_id TEXT NOT NULL REFERENCES sessions(guid),
            email TEXT NOT NULL,
            role TEXT NOT NULL,
            PRIMARY KEY (session_id, email, role)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS session_drills (
            session_id TEXT NOT NULL REFERENCES sessions(guid),
            name TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (session_id, name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_invitations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invitations (
            guid TEXT PRIMARY KEY,
            association_id TEXT NOT NULL REFERENCES associations(guid),
            email TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'evaluator',
            status TEXT NOT NULL DEFAULT 'pending',
            invited_at TEXT NOT NULL,
            responded_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
