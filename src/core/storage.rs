//! Key-value storage seam for device-local state.
//!
//! The completion tracker only needs `get`, `set` and `remove`; the CLI plugs
//! in the SQLite-backed `db::kv::SqliteStore`, tests use `MemoryStore`.

use crate::errors::AppResult;
use std::collections::HashMap;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&mut self, key: &str) -> AppResult<()>;
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        (**self).remove(key)
    }
}
