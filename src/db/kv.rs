//! SQLite-backed key/value store for device-local state.

use crate::core::storage::KeyValueStore;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Owns its own connection so it can live next to a `DbPool` that is
/// borrowed mutably for transactions.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }
}

fn storage_error(e: rusqlite::Error) -> AppError {
    AppError::Storage(e.to_string())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(storage_error)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Local::now().to_rfc3339()],
            )
            .map_err(storage_error)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", [key])
            .map_err(storage_error)?;
        Ok(())
    }
}
