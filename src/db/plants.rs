use crate::db::members::ensure_member_exists;
use crate::errors::{AppError, AppResult};
use crate::models::plant::Plant;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Plant> {
    Ok(Plant {
        id: row.get("id")?,
        name: row.get("name")?,
        interval: row.get("interval")?,
        last_pour: row.get("last_pour")?,
        owner_id: row.get("owner_id")?,
        image: row.get("image")?,
    })
}

fn validate(plant: &Plant) -> AppResult<()> {
    if plant.name.trim().is_empty() {
        return Err(AppError::Validation("plant name must not be empty".into()));
    }
    if plant.interval < 1 {
        return Err(AppError::Validation(
            "interval must be a positive integer (>= 1)".into(),
        ));
    }
    Ok(())
}

pub fn insert_plant(conn: &Connection, plant: &Plant) -> AppResult<i64> {
    validate(plant)?;
    ensure_member_exists(conn, plant.owner_id)?;

    conn.execute(
        "INSERT INTO plant (name, interval, last_pour, image, owner_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            plant.name.trim(),
            plant.interval,
            plant.last_pour,
            plant.image,
            plant.owner_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_plant(conn: &Connection, plant: &Plant) -> AppResult<()> {
    validate(plant)?;
    ensure_member_exists(conn, plant.owner_id)?;

    let changed = conn.execute(
        "UPDATE plant SET name = ?1, interval = ?2, last_pour = ?3, image = ?4, owner_id = ?5
         WHERE id = ?6",
        params![
            plant.name.trim(),
            plant.interval,
            plant.last_pour,
            plant.image,
            plant.owner_id,
            plant.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound { kind: "Plant", id: plant.id });
    }
    Ok(())
}

pub fn mark_watered(conn: &Connection, id: i64, at: i64) -> AppResult<()> {
    let changed = conn.execute("UPDATE plant SET last_pour = ?1 WHERE id = ?2", params![at, id])?;
    if changed == 0 {
        return Err(AppError::NotFound { kind: "Plant", id });
    }
    Ok(())
}

pub fn load_plants(conn: &Connection) -> AppResult<Vec<Plant>> {
    let mut stmt = conn.prepare("SELECT * FROM plant ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_plant(conn: &Connection, id: i64) -> AppResult<Plant> {
    conn.query_row("SELECT * FROM plant WHERE id = ?1", [id], map_row)
        .optional()?
        .ok_or(AppError::NotFound { kind: "Plant", id })
}

pub fn delete_plant(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM plant WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound { kind: "Plant", id });
    }
    Ok(())
}
