//! Previous-level ranking database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::Level;
use tryline_common::Result;

/// List levels for an association, highest rank first (rank 1 = top tier)
pub async fn list_levels(pool: &SqlitePool, association_id: &str) -> Result<Vec<Level>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, association_id, name, rank
        FROM levels
        WHERE association_id = ?
        ORDER BY rank, name
        "#,
    )
    .bind(association_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Level {
            guid: row.get("guid"),
            association_id: row.get("association_id"),
            name: row.get("name"),
            rank: row.get("rank"),
        })
        .collect())
}

pub async fn create_level(pool: &SqlitePool, level: &Level) -> Result<()> {
    sqlx::query("INSERT INTO levels (guid, association_id, name, rank) VALUES (?, ?, ?, ?)")
        .bind(&level.guid)
        .bind(&level.association_id)
        .bind(&level.name)
        .bind(level.rank)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_level(pool: &SqlitePool, guid: &str, name: &str, rank: i64) -> Result<u64> {
    let result = sqlx::query("UPDATE levels SET name = ?, rank = ? WHERE guid = ?")
        .bind(name)
        .bind(rank)
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_level(pool: &SqlitePool, guid: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM levels WHERE guid = ?")
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
