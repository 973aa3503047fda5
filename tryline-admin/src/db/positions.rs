//! Position type database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::PositionType;
use tryline_common::Result;

pub async fn list_positions(pool: &SqlitePool, association_id: &str) -> Result<Vec<PositionType>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, association_id, name, sort_order
        FROM position_types
        WHERE association_id = ?
        ORDER BY sort_order, name
        "#,
    )
    .bind(association_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| PositionType {
            guid: row.get("guid"),
            association_id: row.get("association_id"),
            name: row.get("name"),
            sort_order: row.get("sort_order"),
        })
        .collect())
}

pub async fn create_position(pool: &SqlitePool, position: &PositionType) -> Result<()> {
    sqlx::query(
        "INSERT INTO position_types (guid, association_id, name, sort_order) VALUES (?, ?, ?, ?)",
    )
    .bind(&position.guid)
    .bind(&position.association_id)
    .bind(&position.name)
    .bind(position.sort_order)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_position(
    pool: &SqlitePool,
    guid: &str,
    name: &str,
    sort_order: i64,
) -> Result<u64> {
    let result = sqlx::query("UPDATE position_types SET name = ?, sort_order = ? WHERE guid = ?")
        .bind(name)
        .bind(sort_order)
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_position(pool: &SqlitePool, guid: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM position_types WHERE guid = ?")
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
