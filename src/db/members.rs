use crate::errors::{AppError, AppResult};
use crate::models::member::{FamilyMember, MemberId};
use crate::models::wire::SetAvailability;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<FamilyMember> {
    Ok(FamilyMember {
        id: row.get("id")?,
        name: row.get("name")?,
        role: row.get("role")?,
        is_available: row.get::<_, i64>("is_available")? != 0,
        unavailable_since: row.get("unavailable_since")?,
        unavailable_until: row.get("unavailable_until")?,
    })
}

pub fn ensure_member_exists(conn: &Connection, id: MemberId) -> AppResult<()> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM person WHERE id = ?1", [id], |row| row.get(0))
        .optional()?;
    found
        .map(|_| ())
        .ok_or(AppError::NotFound { kind: "Person", id })
}

pub fn insert_member(conn: &Connection, member: &FamilyMember) -> AppResult<MemberId> {
    if member.name.trim().is_empty() {
        return Err(AppError::Validation("person name must not be empty".into()));
    }

    conn.execute(
        "INSERT INTO person (name, role, is_available, unavailable_since, unavailable_until)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            member.name.trim(),
            member.role.trim(),
            i64::from(member.is_available),
            member.unavailable_since,
            member.unavailable_until,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_members(conn: &Connection) -> AppResult<Vec<FamilyMember>> {
    let mut stmt = conn.prepare("SELECT * FROM person ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_member(conn: &Connection, id: MemberId) -> AppResult<FamilyMember> {
    conn.query_row("SELECT * FROM person WHERE id = ?1", [id], map_row)
        .optional()?
        .ok_or(AppError::NotFound { kind: "Person", id })
}

/// Persist an availability change; the stored window is replaced as given.
pub fn set_availability(conn: &Connection, update: &SetAvailability) -> AppResult<()> {
    update.validate()?;
    ensure_member_exists(conn, update.person_id)?;

    conn.execute(
        "UPDATE person
         SET is_available = ?1, unavailable_since = ?2, unavailable_until = ?3
         WHERE id = ?4",
        params![
            i64::from(update.is_available),
            update.unavailable_since,
            update.unavailable_until,
            update.person_id,
        ],
    )?;
    Ok(())
}
