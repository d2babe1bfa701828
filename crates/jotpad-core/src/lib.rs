//! jotpad-core - Core library for Jotpad
//!
//! This crate owns the note collection and its persisted snapshot: models,
//! key-value storage backends, the note store, plain-text search, debounced
//! autosave and export. Rendering is left to callers.

pub mod autosave;
pub mod config;
pub mod error;
pub mod export;
pub mod markup;
pub mod models;
pub mod storage;
pub mod store;
pub mod util;

pub use autosave::{Autosave, Debouncer, SharedNoteStore};
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use models::{Note, NoteId, SubNote, SubNoteId};
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::NoteStore;
