use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] jotpad_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Sub-note text cannot be empty")]
    EmptySubnoteText,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("Sub-note not found for id/prefix: {0}")]
    SubnoteNotFound(String),
    #[error("{0}")]
    AmbiguousId(String),
    #[error("Not an image file: {0}")]
    NotAnImage(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Refusing to delete without confirmation; pass --yes")]
    ConfirmationRequired,
}
