//! Location database operations

use sqlx::{Row, SqlitePool};
use tryline_common::db::models::Location;
use tryline_common::Result;

pub async fn list_locations(pool: &SqlitePool, association_id: &str) -> Result<Vec<Location>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, association_id, name, address
        FROM locations
        WHERE association_id = ?
        ORDER BY name
        "#,
    )
    .bind(association_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Location {
            guid: row.get("guid"),
            association_id: row.get("association_id"),
            name: row.get("name"),
            address: row.get("address"),
        })
        .collect())
}

pub async fn create_location(pool: &SqlitePool, location: &Location) -> Result<()> {
    sqlx::query("INSERT INTO locations (guid, association_id, name, address) VALUES (?, ?, ?, ?)")
        .bind(&location.guid)
        .bind(&location.association_id)
        .bind(&location.name)
        .bind(&location.address)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_location(
    pool: &SqlitePool,
    guid: &str,
    name: &str,
    address: Option<&str>,
) -> Result<u64> {
    let result = sqlx::query("UPDATE locations SET name = ?, address = ? WHERE guid = ?")
        .bind(name)
        .bind(address)
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_location(pool: &SqlitePool, guid: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM locations WHERE guid = ?")
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
