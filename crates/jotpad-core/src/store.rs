//! Note store: the in-memory collection and its persisted snapshot.
//!
//! Every mutating operation updates memory first and then overwrites the
//! snapshot with the full collection. When the write fails the collection is
//! rolled back, so memory and storage agree whenever an operation returns.
//! Lookups that miss are `Ok(None)` and leave both untouched.

use std::collections::HashSet;

use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::export::{render_notes_export, ExportFormat};
use crate::markup::plain_text;
use crate::models::{Note, NoteId, SubNote, SubNoteId};
use crate::storage::KeyValueStore;

/// A loaded collection and whether loading had to assign ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    /// Some note or sub-note was missing an id, or an id was duplicated,
    /// and got a fresh one. Those ids only exist in memory until persisted.
    pub reassigned_ids: bool,
}

/// Read the snapshot stored under the configured key.
///
/// Missing, unreadable or malformed snapshots load as an empty collection.
pub fn load_snapshot(backend: &impl KeyValueStore, config: &StoreConfig) -> Snapshot {
    let raw = match backend.get(&config.storage_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Snapshot::default(),
        Err(error) => {
            tracing::warn!("Failed to read note snapshot: {}", error);
            return Snapshot::default();
        }
    };

    parse_snapshot(&raw, &config.placeholder_title).unwrap_or_else(|| {
        tracing::warn!(
            "Ignoring malformed note snapshot under '{}'",
            config.storage_key
        );
        Snapshot::default()
    })
}

/// Parse a snapshot payload. Returns `None` when it is not a JSON array.
///
/// Bare string elements are notes from the plain-text layout and become a
/// note with that text as content. Elements that cannot be read are skipped.
pub fn parse_snapshot(raw: &str, placeholder_title: &str) -> Option<Snapshot> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };

    let mut seen = HashSet::new();
    let mut snapshot = Snapshot {
        notes: Vec::with_capacity(items.len()),
        reassigned_ids: false,
    };
    for (index, item) in items.into_iter().enumerate() {
        let mut note = match item {
            Value::String(text) => {
                snapshot.reassigned_ids = true;
                Note::new(placeholder_title, text)
            }
            value @ Value::Object(_) => match serde_json::from_value::<Note>(value) {
                Ok(note) => note,
                Err(error) => {
                    tracing::warn!("Skipping unreadable note at index {}: {}", index, error);
                    continue;
                }
            },
            _ => {
                tracing::warn!("Skipping non-note entry at index {}", index);
                continue;
            }
        };

        snapshot.reassigned_ids |= note.normalize_loaded();
        while !seen.insert(note.id.clone()) {
            note.id = NoteId::new();
            snapshot.reassigned_ids = true;
        }
        snapshot.notes.push(note);
    }

    Some(snapshot)
}

/// Serialize `notes` and overwrite the snapshot under `key`.
pub fn persist_notes(backend: &mut impl KeyValueStore, key: &str, notes: &[Note]) -> Result<()> {
    let payload = serde_json::to_string(notes)?;
    backend.set(key, &payload)?;
    tracing::debug!("Persisted {} notes ({} bytes)", notes.len(), payload.len());
    Ok(())
}

/// Sole owner of the note collection, the current selection and the snapshot.
pub struct NoteStore<S: KeyValueStore> {
    backend: S,
    config: StoreConfig,
    notes: Vec<Note>,
    current: Option<NoteId>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Load the collection and select its first note.
    ///
    /// An empty collection gets a fresh note so there is always something to
    /// select.
    pub fn open(backend: S, config: StoreConfig) -> Result<Self> {
        let snapshot = load_snapshot(&backend, &config);
        tracing::debug!(
            "Loaded {} notes from '{}'",
            snapshot.notes.len(),
            config.storage_key
        );

        let current = snapshot.notes.first().map(|note| note.id.clone());
        let mut store = Self {
            backend,
            config,
            notes: snapshot.notes,
            current,
        };
        if store.notes.is_empty() {
            store.create_note()?;
        } else if snapshot.reassigned_ids {
            // Generated ids must survive the next load to stay addressable.
            store.persist()?;
            tracing::info!("Persisted ids assigned while loading notes");
        }
        Ok(store)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub const fn current_id(&self) -> Option<&NoteId> {
        self.current.as_ref()
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    /// Select a note. Unknown ids leave the selection unchanged.
    pub fn open_note(&mut self, id: &NoteId) -> Option<&Note> {
        let index = self.position(id)?;
        self.current = Some(id.clone());
        self.notes.get(index)
    }

    /// Serialize the full collection and overwrite the snapshot.
    pub fn persist(&mut self) -> Result<()> {
        persist_notes(&mut self.backend, &self.config.storage_key, &self.notes)
    }

    /// Create an empty note at the front of the collection and select it.
    pub fn create_note(&mut self) -> Result<Note> {
        let previous_current = self.current.clone();
        let note = self.new_placeholder_note();
        self.notes.insert(0, note.clone());
        self.current = Some(note.id.clone());

        if let Err(error) = self.persist() {
            self.notes.remove(0);
            self.current = previous_current;
            return Err(error);
        }

        tracing::info!("Created note {}", note.id);
        Ok(note)
    }

    /// Replace a note's title and content.
    ///
    /// A blank title is stored as the placeholder title.
    pub fn update_note(&mut self, id: &NoteId, title: &str, content: &str) -> Result<Option<Note>> {
        let title = if title.trim().is_empty() {
            self.config.placeholder_title.clone()
        } else {
            title.to_string()
        };

        self.mutate_note(id, |note| {
            note.title = title;
            note.content = content.to_string();
            note.touch();
            Some(note.clone())
        })
    }

    /// Append a markup fragment (e.g. an embedded image) to a note's content.
    pub fn insert_fragment(&mut self, id: &NoteId, fragment: &str) -> Result<Option<Note>> {
        if fragment.is_empty() {
            return Ok(None);
        }

        self.mutate_note(id, |note| {
            note.content.push_str(fragment);
            note.touch();
            Some(note.clone())
        })
    }

    /// Remove a note.
    ///
    /// Removing the last note creates a fresh one. When the removed note was
    /// selected, the note before it (or the first note) becomes current.
    pub fn delete_note(&mut self, id: &NoteId) -> Result<Option<Note>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let previous_notes = self.notes.clone();
        let previous_current = self.current.clone();

        let removed = self.notes.remove(index);
        if self.notes.is_empty() {
            let replacement = self.new_placeholder_note();
            self.current = Some(replacement.id.clone());
            self.notes.push(replacement);
        } else if self.current.is_none() || self.current.as_ref() == Some(&removed.id) {
            let next = &self.notes[index.saturating_sub(1).min(self.notes.len() - 1)];
            self.current = Some(next.id.clone());
        }

        if let Err(error) = self.persist() {
            self.notes = previous_notes;
            self.current = previous_current;
            return Err(error);
        }

        tracing::info!("Deleted note {}", removed.id);
        Ok(Some(removed))
    }

    /// Append a sub-note. Blank text is skipped.
    pub fn add_subnote(&mut self, note_id: &NoteId, text: &str) -> Result<Option<SubNote>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.mutate_note(note_id, |note| {
            let mut subnote = SubNote::new(text);
            while note.subnote(&subnote.id).is_some() {
                subnote.id = SubNoteId::new();
            }
            note.subnotes.push(subnote.clone());
            note.touch();
            Some(subnote)
        })
    }

    pub fn remove_subnote(
        &mut self,
        note_id: &NoteId,
        subnote_id: &SubNoteId,
    ) -> Result<Option<SubNote>> {
        self.mutate_note(note_id, |note| {
            let index = note.subnotes.iter().position(|s| &s.id == subnote_id)?;
            let removed = note.subnotes.remove(index);
            note.touch();
            Some(removed)
        })
    }

    /// Replace a sub-note's text in place. Blank text is skipped.
    pub fn update_subnote_text(
        &mut self,
        note_id: &NoteId,
        subnote_id: &SubNoteId,
        text: &str,
    ) -> Result<Option<SubNote>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        self.mutate_note(note_id, |note| {
            let subnote = note.subnotes.iter_mut().find(|s| &s.id == subnote_id)?;
            subnote.text = text.to_string();
            let updated = subnote.clone();
            note.touch();
            Some(updated)
        })
    }

    /// Notes whose title or plain-text content contains `query`, ignoring case.
    ///
    /// An empty query returns every note in collection order. Whitespace in
    /// the query is matched as typed.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        if query.is_empty() {
            return self.notes.iter().collect();
        }
        let needle = query.to_lowercase();

        self.notes
            .iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&needle)
                    || plain_text(&note.content).to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Render the whole collection for download.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        Ok(render_notes_export(&self.notes, format)?)
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }

    fn new_placeholder_note(&self) -> Note {
        let mut note = Note::new(self.config.placeholder_title.clone(), String::new());
        while self.position(&note.id).is_some() {
            note.id = NoteId::new();
        }
        note
    }

    /// Apply `change` to one note and persist, rolling back if the write fails.
    ///
    /// `change` returning `None` means nothing matched; nothing is written.
    fn mutate_note<T>(
        &mut self,
        id: &NoteId,
        change: impl FnOnce(&mut Note) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let previous = self.notes[index].clone();
        let Some(output) = change(&mut self.notes[index]) else {
            self.notes[index] = previous;
            return Ok(None);
        };

        if let Err(error) = self.persist() {
            self.notes[index] = previous;
            return Err(error);
        }
        Ok(Some(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryKeyValueStore, SqliteKeyValueStore};
    use pretty_assertions::assert_eq;

    fn open_empty() -> NoteStore<MemoryKeyValueStore> {
        NoteStore::open(MemoryKeyValueStore::new(), StoreConfig::default()).unwrap()
    }

    fn assert_snapshot_matches<S: KeyValueStore>(store: &NoteStore<S>) {
        let reloaded = load_snapshot(store.backend(), store.config()).notes;
        assert_eq!(reloaded.as_slice(), store.notes());
    }

    #[test]
    fn open_empty_storage_creates_untitled_note() {
        let store = open_empty();

        assert_eq!(store.len(), 1);
        let note = store.current_note().unwrap();
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.content, "");
        assert!(note.subnotes.is_empty());
        assert_snapshot_matches(&store);
    }

    #[test]
    fn open_selects_first_loaded_note() {
        let snapshot = r#"[{"id":"b","title":"Beta"},{"id":"a","title":"Alpha"}]"#;
        let store = NoteStore::open(
            MemoryKeyValueStore::with_entry("notes", snapshot),
            StoreConfig::default(),
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.current_id().map(NoteId::as_str), Some("b"));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn update_then_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jotpad.db");

        let note_id = {
            let mut store =
                NoteStore::open(SqliteKeyValueStore::open(&path).unwrap(), StoreConfig::default())
                    .unwrap();
            let note = store.current_note().unwrap().clone();
            assert_eq!(note.title, "Untitled");

            store
                .update_note(&note.id, "Groceries", "milk, eggs")
                .unwrap()
                .unwrap();
            note.id
        };

        let reopened =
            NoteStore::open(SqliteKeyValueStore::open(&path).unwrap(), StoreConfig::default())
                .unwrap();
        assert_eq!(reopened.len(), 1);
        let note = &reopened.notes()[0];
        assert_eq!(note.id, note_id);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
    }

    #[test]
    fn create_note_prepends_and_selects() {
        let mut store = open_empty();
        let before = store.len();

        let note = store.create_note().unwrap();

        assert_eq!(store.len(), before + 1);
        assert_eq!(store.notes()[0].id, note.id);
        assert_eq!(store.current_id(), Some(&note.id));
        assert_snapshot_matches(&store);
    }

    #[test]
    fn created_ids_are_unique() {
        let mut store = open_empty();
        for _ in 0..50 {
            store.create_note().unwrap();
        }

        let ids = store.notes().iter().map(|n| &n.id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn blank_title_becomes_placeholder() {
        let mut store = open_empty();
        let id = store.current_id().unwrap().clone();

        let updated = store.update_note(&id, "", "body").unwrap().unwrap();
        assert_eq!(updated.title, "Untitled");

        let updated = store.update_note(&id, "   ", "body").unwrap().unwrap();
        assert_eq!(updated.title, "Untitled");
        assert!(updated.updated_at >= updated.created_at);
        assert_snapshot_matches(&store);
    }

    #[test]
    fn placeholder_title_follows_config() {
        let config = StoreConfig {
            placeholder_title: "New note".to_string(),
            ..StoreConfig::default()
        };
        let store = NoteStore::open(MemoryKeyValueStore::new(), config).unwrap();
        assert_eq!(store.notes()[0].title, "New note");
    }

    #[test]
    fn update_unknown_note_is_noop() {
        let mut store = open_empty();
        let writes = store.backend().write_count();

        let result = store
            .update_note(&NoteId::from("missing"), "Title", "Body")
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn deleting_only_note_creates_replacement() {
        let mut store = open_empty();
        let only = store.current_id().unwrap().clone();

        let removed = store.delete_note(&only).unwrap().unwrap();

        assert_eq!(removed.id, only);
        assert_eq!(store.len(), 1);
        assert_ne!(store.notes()[0].id, only);
        assert_eq!(store.current_id(), Some(&store.notes()[0].id));
        assert_snapshot_matches(&store);
    }

    #[test]
    fn deleting_current_selects_previous_note() {
        let mut store = open_empty();
        let oldest = store.current_id().unwrap().clone();
        let middle = store.create_note().unwrap().id;
        let newest = store.create_note().unwrap().id;
        // Order: newest, middle, oldest
        store.open_note(&oldest);

        store.delete_note(&oldest).unwrap();
        assert_eq!(store.current_id(), Some(&middle));

        store.open_note(&newest);
        store.delete_note(&newest).unwrap();
        assert_eq!(store.current_id(), Some(&middle));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deleting_other_note_keeps_selection() {
        let mut store = open_empty();
        let first = store.current_id().unwrap().clone();
        let second = store.create_note().unwrap().id;

        store.delete_note(&first).unwrap();
        assert_eq!(store.current_id(), Some(&second));
    }

    #[test]
    fn delete_unknown_note_returns_none() {
        let mut store = open_empty();
        assert!(store.delete_note(&NoteId::from("nope")).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn subnote_lifecycle_is_persisted() {
        let mut store = open_empty();
        let note_id = store.current_id().unwrap().clone();

        let subnote = store.add_subnote(&note_id, "  buy milk ").unwrap().unwrap();
        assert_eq!(subnote.text, "buy milk");
        assert_snapshot_matches(&store);

        let edited = store
            .update_subnote_text(&note_id, &subnote.id, "buy oat milk")
            .unwrap()
            .unwrap();
        assert_eq!(edited.id, subnote.id);
        assert_eq!(store.get(&note_id).unwrap().subnotes[0].text, "buy oat milk");
        assert_snapshot_matches(&store);

        store.remove_subnote(&note_id, &subnote.id).unwrap().unwrap();
        assert!(store.get(&note_id).unwrap().subnotes.is_empty());
        assert_snapshot_matches(&store);

        let reloaded = load_snapshot(store.backend(), store.config()).notes;
        assert!(reloaded[0].subnotes.is_empty());
    }

    #[test]
    fn subnotes_keep_insertion_order() {
        let mut store = open_empty();
        let note_id = store.current_id().unwrap().clone();
        for text in ["one", "two", "three"] {
            store.add_subnote(&note_id, text).unwrap();
        }

        let texts = store.get(&note_id).unwrap().subnotes.iter().map(|s| s.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn blank_subnote_text_is_skipped() {
        let mut store = open_empty();
        let note_id = store.current_id().unwrap().clone();
        let writes = store.backend().write_count();

        assert!(store.add_subnote(&note_id, "   ").unwrap().is_none());
        assert!(store.get(&note_id).unwrap().subnotes.is_empty());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn subnote_lookup_misses_are_noops() {
        let mut store = open_empty();
        let note_id = store.current_id().unwrap().clone();
        let writes = store.backend().write_count();
        let missing = SubNoteId::from("missing");

        assert!(store.add_subnote(&NoteId::from("x"), "text").unwrap().is_none());
        assert!(store.remove_subnote(&note_id, &missing).unwrap().is_none());
        assert!(store
            .update_subnote_text(&note_id, &missing, "text")
            .unwrap()
            .is_none());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn search_matches_title_or_plain_text_content() {
        let mut store = open_empty();
        let a = store.current_id().unwrap().clone();
        store.update_note(&a, "Alpha", "first").unwrap();
        let b = store.create_note().unwrap().id;
        store.update_note(&b, "Beta", "<b>Alp</b>ine").unwrap();
        let c = store.create_note().unwrap().id;
        store.update_note(&c, "Gamma", "<img alt=\"alp\" src=\"x\">").unwrap();

        let results = store.search("alp").iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        assert_eq!(results, vec![b.clone(), a.clone()]);

        let results = store.search("ALPHA").iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        assert_eq!(results, vec![a]);
    }

    #[test]
    fn search_alpha_beta_scenario() {
        let mut store = open_empty();
        let a = store.current_id().unwrap().clone();
        store.update_note(&a, "Alpha", "").unwrap();
        let b = store.create_note().unwrap().id;
        store.update_note(&b, "Beta", "").unwrap();

        let results = store.search("alp");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, a);
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let mut store = open_empty();
        store.create_note().unwrap();
        store.create_note().unwrap();

        let all = store.search("").into_iter().cloned().collect::<Vec<_>>();
        assert_eq!(all.as_slice(), store.notes());
    }

    #[test]
    fn search_matches_query_whitespace_as_typed() {
        let mut store = open_empty();
        let a = store.current_id().unwrap().clone();
        store.update_note(&a, "Alpha", "").unwrap();
        let b = store.create_note().unwrap().id;
        store.update_note(&b, "Beta", "<p>the alps</p>").unwrap();

        let results = store.search(" alp");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, b);

        assert!(store.search("   ").is_empty());
    }

    #[test]
    fn insert_fragment_appends_to_content() {
        let mut store = open_empty();
        let id = store.current_id().unwrap().clone();
        store.update_note(&id, "Sketch", "<p>see below</p>").unwrap();

        let note = store
            .insert_fragment(&id, r#"<img src="data:image/png;base64,AA">"#)
            .unwrap()
            .unwrap();

        assert_eq!(
            note.content,
            r#"<p>see below</p><img src="data:image/png;base64,AA">"#
        );
        assert_snapshot_matches(&store);
    }

    #[test]
    fn failed_write_rolls_back_memory() {
        let mut store = open_empty();
        let id = store.current_id().unwrap().clone();
        store.update_note(&id, "Saved", "kept").unwrap();

        store.backend.fail_writes(true);
        assert!(store.update_note(&id, "Lost", "dropped").is_err());
        assert!(store.create_note().is_err());
        assert!(store.delete_note(&id).is_err());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().title, "Saved");
        assert_eq!(store.current_id(), Some(&id));
        assert_snapshot_matches(&store);
    }

    #[test]
    fn mixed_operations_keep_snapshot_in_sync() {
        let mut store = open_empty();
        let first = store.current_id().unwrap().clone();

        store.update_note(&first, "One", "<p>1</p>").unwrap();
        assert_snapshot_matches(&store);
        let second = store.create_note().unwrap().id;
        assert_snapshot_matches(&store);
        let sub = store.add_subnote(&second, "child").unwrap().unwrap();
        assert_snapshot_matches(&store);
        store.update_subnote_text(&second, &sub.id, "renamed").unwrap();
        assert_snapshot_matches(&store);
        store.delete_note(&first).unwrap();
        assert_snapshot_matches(&store);
        store.delete_note(&second).unwrap();
        assert_snapshot_matches(&store);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn malformed_snapshot_loads_empty() {
        let backend = MemoryKeyValueStore::with_entry("notes", "{not json");
        assert!(load_snapshot(&backend, &StoreConfig::default()).notes.is_empty());

        let backend = MemoryKeyValueStore::with_entry("notes", r#"{"id":"a"}"#);
        assert!(load_snapshot(&backend, &StoreConfig::default()).notes.is_empty());
    }

    #[test]
    fn plain_string_snapshot_is_read_as_notes() {
        let notes = parse_snapshot(r#"["buy milk", "call mom"]"#, "Untitled")
            .unwrap()
            .notes;

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "buy milk");
        assert_eq!(notes[0].title, "Untitled");
        assert_ne!(notes[0].id, notes[1].id);
    }

    #[test]
    fn unreadable_entries_are_skipped() {
        let raw = r#"[{"id":"a","title":"ok"}, {"title": 5}, 42, null]"#;
        let notes = parse_snapshot(raw, "Untitled").unwrap().notes;

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "ok");
    }

    #[test]
    fn duplicate_ids_are_reassigned_on_load() {
        let raw = r#"[{"id":"same","title":"a"},{"id":"same","title":"b"}]"#;
        let notes = parse_snapshot(raw, "Untitled").unwrap().notes;

        assert_eq!(notes[0].id.as_str(), "same");
        assert_ne!(notes[1].id.as_str(), "same");
    }

    #[test]
    fn legacy_snapshot_fields_are_kept() {
        let raw = r#"[{"id":"1712345678901","title":"Old","content":"<b>x</b>",
            "subnotes":[{"id":"1712345678999","text":"child"}],
            "createdAt":1712345678901,"updatedAt":1712345679000}]"#;
        let notes = parse_snapshot(raw, "Untitled").unwrap().notes;

        assert_eq!(notes[0].id.as_str(), "1712345678901");
        assert_eq!(notes[0].subnotes[0].id.as_str(), "1712345678999");
        assert_eq!(notes[0].created_at, 1_712_345_678_901);
        assert_eq!(notes[0].updated_at, 1_712_345_679_000);
    }

    #[test]
    fn persist_notes_writes_under_custom_key() {
        let mut backend = MemoryKeyValueStore::new();
        let notes = vec![Note::new("Kept", "<p>body</p>")];

        persist_notes(&mut backend, "archive", &notes).unwrap();

        assert_eq!(backend.get("notes").unwrap(), None);
        let config = StoreConfig {
            storage_key: "archive".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(load_snapshot(&backend, &config).notes, notes);
    }

    #[test]
    fn ids_assigned_on_load_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jotpad.db");
        {
            let mut backend = SqliteKeyValueStore::open(&path).unwrap();
            backend
                .set("notes", r#"["buy milk", {"title":"no id"}]"#)
                .unwrap();
        }
        let open = || {
            NoteStore::open(SqliteKeyValueStore::open(&path).unwrap(), StoreConfig::default())
                .unwrap()
        };

        let first_ids = open().notes().iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        let mut store = open();
        let second_ids = store.notes().iter().map(|n| n.id.clone()).collect::<Vec<_>>();

        assert_eq!(first_ids.len(), 2);
        assert_eq!(second_ids, first_ids);
        assert!(store
            .update_note(&first_ids[0], "Groceries", "buy milk")
            .unwrap()
            .is_some());
    }

    #[test]
    fn open_persists_only_when_ids_were_assigned() {
        let repaired = NoteStore::open(
            MemoryKeyValueStore::with_entry("notes", r#"[{"id":"a"},{"id":"a"}]"#),
            StoreConfig::default(),
        )
        .unwrap();
        assert_eq!(repaired.backend().write_count(), 1);
        assert_snapshot_matches(&repaired);

        let intact = NoteStore::open(
            MemoryKeyValueStore::with_entry("notes", r#"[{"id":"a"},{"id":"b"}]"#),
            StoreConfig::default(),
        )
        .unwrap();
        assert_eq!(intact.backend().write_count(), 0);
    }
}
