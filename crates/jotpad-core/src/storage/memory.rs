//! In-process key-value store

use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::{Error, Result};

/// `HashMap`-backed store, mainly for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one existing entry
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Number of successful `set` calls since creation
    pub const fn write_count(&self) -> usize {
        self.writes
    }

    /// Make every subsequent `set` fail, to exercise write-error paths
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Storage(format!("write to '{key}' rejected")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
