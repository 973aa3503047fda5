//! Wave database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::{DistributionAlgorithm, Wave};
use tryline_common::Result;
use uuid::Uuid;

fn wave_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Wave> {
    let wave_type: String = row.get("wave_type");
    let status: String = row.get("status");
    let algorithm: String = row.get("distribution_algorithm");
    Ok(Wave {
        guid: row.get("guid"),
        cohort_id: row.get("cohort_id"),
        season_id: row.get("season_id"),
        wave_number: row.get("wave_number"),
        name: row.get("name"),
        wave_type: wave_type.parse()?,
        status: status.parse()?,
        distribution_algorithm: algorithm.parse()?,
        teams_per_session: row.get("teams_per_session"),
    })
}

/// List waves for a cohort/season, standard waves first in number order,
/// custom waves after
pub async fn list_waves(pool: &SqlitePool, cohort_id: &str, season_id: &str) -> Result<Vec<Wave>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, cohort_id, season_id, wave_number, name, wave_type, status,
               distribution_algorithm, teams_per_session
        FROM waves
        WHERE cohort_id = ? AND season_id = ?
        ORDER BY wave_number IS NULL, wave_number, name
        "#,
    )
    .bind(cohort_id)
    .bind(season_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(wave_from_row).collect()
}

pub async fn get_wave(pool: &SqlitePool, guid: &str) -> Result<Option<Wave>> {
    let row = sqlx::query(
        r#"
        SELECT guid, cohort_id, season_id, wave_number, name, wave_type, status,
               distribution_algorithm, teams_per_session
        FROM waves
        WHERE guid = ?
        "#,
    )
    .bind(guid)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(wave_from_row).transpose()
}

/// Wave numbers of the standard waves that already exist for a cohort/season
pub async fn existing_wave_numbers(
    pool: &SqlitePool,
    cohort_id: &str,
    season_id: &str,
) -> Result<Vec<i64>> {
    let numbers: Vec<i64> = sqlx::query_scalar(
        r#"
        SELECT wave_number
        FROM waves
        WHERE cohort_id = ? AND season_id = ? AND wave_type = 'standard'
              AND wave_number IS NOT NULL
        ORDER BY wave_number
        "#,
    )
    .bind(cohort_id)
    .bind(season_id)
    .fetch_all(pool)
    .await?;

    Ok(numbers)
}

/// Batch-insert standard waves with the default starting configuration.
///
/// Runs in one transaction: either every missing wave is created or none
/// is, so a uniqueness conflict from a concurrent provisioner cannot leave
/// a partially provisioned set behind.
pub async fn create_standard_waves(
    pool: &SqlitePool,
    cohort_id: &str,
    season_id: &str,
    wave_numbers: &[i64],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    for number in wave_numbers {
        sqlx::query(
            r#"
            INSERT INTO waves (guid, cohort_id, season_id, wave_number, wave_type,
                               status, distribution_algorithm, teams_per_session)
            VALUES (?, ?, ?, ?, 'standard', 'not_started', 'alphabetical', 2)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(cohort_id)
        .bind(season_id)
        .bind(number)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Persist a wave's distribution configuration; returns rows affected
pub async fn update_wave_config(
    pool: &SqlitePool,
    guid: &str,
    algorithm: DistributionAlgorithm,
    teams_per_session: i64,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE waves
        SET distribution_algorithm = ?, teams_per_session = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(algorithm.as_str())
    .bind(teams_per_session)
    .bind(guid)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
