//! Note model

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::SubNote;

/// Title given to notes whose title is blank at write time
pub const DEFAULT_PLACEHOLDER_TITLE: &str = "Untitled";

/// Current Unix timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A unique identifier for a note.
///
/// New ids are UUID v7 strings (time-sortable). Ids read from an existing
/// snapshot are kept verbatim so older stamp-style ids stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A note in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    #[serde(default)]
    pub id: NoteId,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Opaque rich-markup content, may embed images as data URLs
    #[serde(default)]
    pub content: String,
    /// Child items in display order
    #[serde(default)]
    pub subnotes: Vec<SubNote>,
    /// Creation timestamp (Unix ms)
    #[serde(default)]
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    #[serde(default)]
    pub updated_at: i64,
}

impl Note {
    /// Create a new note with the given title and content
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: NoteId::new(),
            title: title.into(),
            content: content.into(),
            subnotes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`, never moving it below `created_at`
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.created_at);
    }

    /// Whether the note still looks freshly created: no text, no sub-notes,
    /// and a blank or placeholder title
    #[must_use]
    pub fn is_pristine(&self, placeholder_title: &str) -> bool {
        let title = self.title.trim();
        (title.is_empty() || title == placeholder_title)
            && self.content.trim().is_empty()
            && self.subnotes.is_empty()
    }

    /// Find a sub-note by id
    pub fn subnote(&self, id: &super::SubNoteId) -> Option<&SubNote> {
        self.subnotes.iter().find(|subnote| &subnote.id == id)
    }

    /// Repair fields a hand-edited or older snapshot may have left invalid.
    ///
    /// Titles are left alone: placeholders are applied on write only.
    /// Returns whether any note or sub-note id had to be generated.
    pub(crate) fn normalize_loaded(&mut self) -> bool {
        let mut reassigned = false;
        if self.id.is_blank() {
            self.id = NoteId::new();
            reassigned = true;
        }
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
        }
        for subnote in &mut self.subnotes {
            reassigned |= subnote.normalize_loaded();
        }
        reassigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_id_unique() {
        let id1 = NoteId::new();
        let id2 = NoteId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_note_id_parse_keeps_legacy_stamp() {
        let parsed: NoteId = "1712345678901".parse().unwrap();
        assert_eq!(parsed.as_str(), "1712345678901");
    }

    #[test]
    fn test_note_new() {
        let note = Note::new("Groceries", "milk");
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
        assert!(note.subnotes.is_empty());
        assert!(note.created_at > 0);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_touch_never_precedes_creation() {
        let mut note = Note::new("Later", "");
        note.created_at = i64::MAX - 1;
        note.touch();
        assert!(note.updated_at >= note.created_at);
    }

    #[test]
    fn test_is_pristine() {
        let mut note = Note::new(DEFAULT_PLACEHOLDER_TITLE, "");
        assert!(note.is_pristine(DEFAULT_PLACEHOLDER_TITLE));

        note.subnotes.push(SubNote::new("child"));
        assert!(!note.is_pristine(DEFAULT_PLACEHOLDER_TITLE));

        let titled = Note::new("Groceries", "");
        assert!(!titled.is_pristine(DEFAULT_PLACEHOLDER_TITLE));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let note: Note = serde_json::from_str(r#"{"title":"Only title"}"#).unwrap();
        assert_eq!(note.title, "Only title");
        assert_eq!(note.content, "");
        assert!(note.subnotes.is_empty());
        assert!(!note.id.as_str().is_empty());
    }

    #[test]
    fn test_serializes_camel_case_timestamps() {
        let note = Note::new("A", "");
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_normalize_loaded_repairs_ids_and_timestamps() {
        let mut note: Note =
            serde_json::from_str(r#"{"id":"  ","createdAt":500,"updatedAt":100}"#).unwrap();
        assert!(note.normalize_loaded());
        assert!(!note.id.as_str().trim().is_empty());
        assert_eq!(note.updated_at, 500);
    }

    #[test]
    fn test_normalize_loaded_reports_subnote_id_repair_only() {
        let mut note: Note = serde_json::from_str(
            r#"{"id":"n1","subnotes":[{"id":"","text":"x"}],"createdAt":500,"updatedAt":100}"#,
        )
        .unwrap();
        assert!(note.normalize_loaded());
        assert!(!note.subnotes[0].id.as_str().is_empty());

        let mut intact: Note = serde_json::from_str(r#"{"id":"n2","createdAt":500}"#).unwrap();
        assert!(!intact.normalize_loaded());
    }
}
