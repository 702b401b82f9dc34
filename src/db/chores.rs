use crate::db::conversion_error;
use crate::db::members::ensure_member_exists;
use crate::errors::{AppError, AppResult};
use crate::models::chore::Chore;
use crate::models::rotation_order::RotationOrder;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Chore> {
    let order_text: Option<String> = row.get("rotation_order")?;
    let rotation_order =
        RotationOrder::from_json(order_text.as_deref()).map_err(|e| conversion_error(5, e))?;

    Ok(Chore {
        id: row.get("id")?,
        name: row.get("name")?,
        interval: row.get("interval")?,
        last_done: row.get("last_done")?,
        worker_id: row.get("worker_id")?,
        rotation_enabled: row.get::<_, i64>("rotation_enabled")? != 0,
        rotation_order,
        last_assigned_index: row.get::<_, Option<i64>>("last_assigned_index")?.unwrap_or(-1),
    })
}

/// Every member a chore refers to must exist.
fn ensure_members(conn: &Connection, chore: &Chore) -> AppResult<()> {
    if let Some(worker) = chore.worker_id {
        ensure_member_exists(conn, worker)?;
    }
    for id in chore.rotation_order.iter() {
        ensure_member_exists(conn, *id)?;
    }
    Ok(())
}

fn order_column(chore: &Chore) -> AppResult<Option<String>> {
    if chore.rotation_order.is_empty() {
        Ok(None)
    } else {
        Ok(Some(chore.rotation_order.to_json()?))
    }
}

pub fn insert_chore(conn: &Connection, chore: &Chore) -> AppResult<i64> {
    chore.validate()?;
    ensure_members(conn, chore)?;

    conn.execute(
        "INSERT INTO chore (name, interval, last_done, rotation_enabled, rotation_order, last_assigned_index, worker_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            chore.name.trim(),
            chore.interval,
            chore.last_done,
            i64::from(chore.rotation_enabled),
            order_column(chore)?,
            chore.last_assigned_index,
            chore.worker_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_chore(conn: &Connection, chore: &Chore) -> AppResult<()> {
    chore.validate()?;
    ensure_members(conn, chore)?;

    let changed = conn.execute(
        "UPDATE chore
         SET name = ?1, interval = ?2, last_done = ?3, rotation_enabled = ?4,
             rotation_order = ?5, last_assigned_index = ?6, worker_id = ?7
         WHERE id = ?8",
        params![
            chore.name.trim(),
            chore.interval,
            chore.last_done,
            i64::from(chore.rotation_enabled),
            order_column(chore)?,
            chore.last_assigned_index,
            chore.worker_id,
            chore.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound { kind: "Chore", id: chore.id });
    }
    Ok(())
}

/// Write `last_done` and `last_assigned_index` together, in one statement.
pub fn save_completion(conn: &Connection, chore: &Chore) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE chore SET last_done = ?1, last_assigned_index = ?2 WHERE id = ?3",
        params![chore.last_done, chore.last_assigned_index, chore.id],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound { kind: "Chore", id: chore.id });
    }
    Ok(())
}

pub fn load_chores(conn: &Connection) -> AppResult<Vec<Chore>> {
    let mut stmt = conn.prepare("SELECT * FROM chore ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_chore(conn: &Connection, id: i64) -> AppResult<Chore> {
    conn.query_row("SELECT * FROM chore WHERE id = ?1", [id], map_row)
        .optional()?
        .ok_or(AppError::NotFound { kind: "Chore", id })
}

pub fn delete_chore(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM chore WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound { kind: "Chore", id });
    }
    Ok(())
}
