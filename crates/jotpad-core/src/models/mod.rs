//! Data models for Jotpad

mod note;
mod subnote;

pub use note::{now_millis, Note, NoteId, DEFAULT_PLACEHOLDER_TITLE};
pub use subnote::{SubNote, SubNoteId};
