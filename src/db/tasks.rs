use crate::db::conversion_error;
use crate::db::members::ensure_member_exists;
use crate::errors::{AppError, AppResult};
use crate::models::one_time_task::OneTimeTask;
use crate::models::priority::Priority;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<OneTimeTask> {
    let priority_str: String = row.get("priority")?;
    let priority = Priority::from_db_str(&priority_str)
        .ok_or_else(|| conversion_error(8, AppError::InvalidPriority(priority_str.clone())))?;

    Ok(OneTimeTask {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        assigned_to: row.get("assigned_to")?,
        created_by: row.get("created_by")?,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
        due_date: row.get("due_date")?,
        priority,
    })
}

pub fn insert_task(conn: &Connection, task: &OneTimeTask) -> AppResult<i64> {
    if task.name.trim().is_empty() {
        return Err(AppError::Validation("task name must not be empty".into()));
    }
    ensure_member_exists(conn, task.assigned_to)?;
    ensure_member_exists(conn, task.created_by)?;

    conn.execute(
        "INSERT INTO one_time_task (name, description, assigned_to, created_by, created_at, completed_at, due_date, priority)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            task.name.trim(),
            task.description,
            task.assigned_to,
            task.created_by,
            task.created_at,
            task.completed_at,
            task.due_date,
            task.priority.to_db_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Set `completed_at`; completing an already completed task is rejected.
pub fn complete_task(conn: &Connection, id: i64, at: i64) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE one_time_task SET completed_at = ?1 WHERE id = ?2 AND completed_at IS NULL",
        params![at, id],
    )?;

    if changed == 0 {
        // tell "missing" apart from "already done"
        load_task(conn, id)?;
        return Err(AppError::Validation(format!("task {} is already completed", id)));
    }
    Ok(())
}

/// Pending tasks first, then by due date (tasks without one last).
pub fn load_tasks(conn: &Connection) -> AppResult<Vec<OneTimeTask>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM one_time_task
         ORDER BY completed_at IS NOT NULL, due_date IS NULL, due_date ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_task(conn: &Connection, id: i64) -> AppResult<OneTimeTask> {
    conn.query_row("SELECT * FROM one_time_task WHERE id = ?1", [id], map_row)
        .optional()?
        .ok_or(AppError::NotFound { kind: "Task", id })
}

pub fn delete_task(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM one_time_task WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound { kind: "Task", id });
    }
    Ok(())
}
