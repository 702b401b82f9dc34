use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists; applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// person / chore / plant, as created by the first releases.
fn create_base_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS person (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL,
            role  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS chore (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            name                TEXT NOT NULL,
            interval            INTEGER NOT NULL CHECK(interval >= 1),
            last_done           INTEGER,
            rotation_enabled    INTEGER NOT NULL DEFAULT 0,
            rotation_order      TEXT,
            last_assigned_index INTEGER NOT NULL DEFAULT -1,
            worker_id           INTEGER,
            FOREIGN KEY(worker_id) REFERENCES person(id)
        );

        CREATE TABLE IF NOT EXISTS plant (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL,
            image     TEXT,
            last_pour INTEGER,
            interval  INTEGER NOT NULL CHECK(interval >= 1),
            owner_id  INTEGER,
            FOREIGN KEY(owner_id) REFERENCES person(id)
        );
        "#,
    )
}

/// Availability flag and window on `person`.
fn add_availability_columns(conn: &Connection) -> Result<()> {
    if !column_exists(conn, "person", "is_available")? {
        conn.execute_batch(
            "ALTER TABLE person ADD COLUMN is_available INTEGER NOT NULL DEFAULT 1;",
        )?;
    }
    if !column_exists(conn, "person", "unavailable_since")? {
        conn.execute_batch("ALTER TABLE person ADD COLUMN unavailable_since INTEGER;")?;
    }
    if !column_exists(conn, "person", "unavailable_until")? {
        conn.execute_batch("ALTER TABLE person ADD COLUMN unavailable_until INTEGER;")?;
    }
    Ok(())
}

fn create_one_time_tasks(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS one_time_task (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            description  TEXT,
            assigned_to  INTEGER NOT NULL,
            created_by   INTEGER NOT NULL,
            created_at   INTEGER NOT NULL,
            completed_at INTEGER,
            due_date     INTEGER,
            priority     TEXT NOT NULL DEFAULT 'medium' CHECK(priority IN ('low','medium','high')),
            FOREIGN KEY(assigned_to) REFERENCES person(id),
            FOREIGN KEY(created_by) REFERENCES person(id)
        );

        CREATE INDEX IF NOT EXISTS idx_one_time_task_assigned ON one_time_task(assigned_to);
        "#,
    )
}

fn create_completion_history(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS completions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id      INTEGER NOT NULL,
            task_type    TEXT NOT NULL CHECK(task_type IN ('plant','chore','one_time')),
            task_name    TEXT NOT NULL,
            member_id    INTEGER NOT NULL,
            completed_at INTEGER NOT NULL,
            rotation     INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_completions_member_time ON completions(member_id, completed_at);
        "#,
    )
}

/// Device-local key/value state (completion tracker).
fn create_kv_store(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
}

type Step = fn(&Connection) -> Result<()>;

const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20250301_0001_base_schema",
        "Created person, chore and plant tables",
        create_base_schema,
    ),
    (
        "20250318_0002_person_availability",
        "Added availability flag and window to person",
        add_availability_columns,
    ),
    (
        "20250402_0003_one_time_tasks",
        "Created one_time_task table",
        create_one_time_tasks,
    ),
    (
        "20250415_0004_completion_history",
        "Created completions history table",
        create_completion_history,
    ),
    (
        "20250415_0005_kv_store",
        "Created kv_store table",
        create_kv_store,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    // Databases created by hand (person table but no migration record) still
    // get the later columns through the idempotent steps.
    if table_exists(conn, "person")? && !is_applied(conn, MIGRATIONS[0].0)? {
        warning("Unversioned schema detected: bringing it up to date...");
    }

    for (version, message, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;
        let result = step(conn).and_then(|_| mark_applied(conn, version, message));
        match result {
            Ok(()) => conn.execute_batch("COMMIT;")?,
            Err(e) => {
                conn.execute_batch("ROLLBACK;")?;
                return Err(e);
            }
        }

        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
