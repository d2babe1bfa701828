//! String-keyed local storage backends for the note snapshot

mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

use crate::error::Result;

/// A local key-value store holding string values under string keys.
///
/// `set` must replace the previous value as a whole: a reader never observes
/// a partially written value.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
