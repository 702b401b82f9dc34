//! Completion history: one row per completed chore, watered plant or
//! finished one-time task. Statistics are computed from here.

use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::completion::CompletionEvent;
use crate::models::member::MemberId;
use crate::models::task_type::TaskType;
use rusqlite::{Connection, Result, Row, params};

pub fn map_row(row: &Row) -> Result<CompletionEvent> {
    let type_str: String = row.get("task_type")?;
    let task_type = TaskType::from_db_str(&type_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidTaskType(type_str.clone())))?;

    Ok(CompletionEvent {
        id: row.get("id")?,
        task_id: row.get("task_id")?,
        task_type,
        task_name: row.get("task_name")?,
        member_id: row.get("member_id")?,
        completed_at: row.get("completed_at")?,
        rotation: row.get::<_, i64>("rotation")? != 0,
    })
}

pub fn insert_event(conn: &Connection, ev: &CompletionEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO completions (task_id, task_type, task_name, member_id, completed_at, rotation)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ev.task_id,
            ev.task_type.to_db_str(),
            ev.task_name,
            ev.member_id,
            ev.completed_at,
            i64::from(ev.rotation),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Events in `[from, to)`, optionally for one member, newest first.
pub fn load_events_between(
    conn: &Connection,
    member: Option<MemberId>,
    from: i64,
    to: i64,
) -> AppResult<Vec<CompletionEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM completions
         WHERE completed_at >= ?1 AND completed_at < ?2
           AND (?3 IS NULL OR member_id = ?3)
         ORDER BY completed_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![from, to, member], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every event, optionally for one member, newest first.
pub fn load_events(conn: &Connection, member: Option<MemberId>) -> AppResult<Vec<CompletionEvent>> {
    load_events_between(conn, member, i64::MIN, i64::MAX)
}
