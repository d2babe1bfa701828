//! Debounced autosave.
//!
//! Typing produces a stream of edits; persisting each one would rewrite the
//! whole snapshot per keystroke. `Autosave` keeps the latest draft and
//! applies it once the editor has been quiet for the configured delay. Every
//! new edit restarts the timer, and `save_now` applies the draft immediately.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::models::{Note, NoteId};
use crate::storage::KeyValueStore;
use crate::store::NoteStore;

/// Note store shared between the caller and scheduled saves.
pub type SharedNoteStore<S> = Arc<Mutex<NoteStore<S>>>;

/// Runs at most one delayed task; scheduling again replaces the pending one.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending task and run `task` after the quiet period.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel_pending();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancel the pending task. Returns whether one was still waiting.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

#[derive(Debug, Clone)]
struct Draft {
    note_id: NoteId,
    title: String,
    content: String,
    version: u64,
}

/// Coalesces rapid title/content edits into a single `update_note` call.
pub struct Autosave<S: KeyValueStore + Send + 'static> {
    store: SharedNoteStore<S>,
    debouncer: Debouncer,
    draft: Option<Draft>,
    version: u64,
    saved_version: Arc<AtomicU64>,
}

impl<S: KeyValueStore + Send + 'static> Autosave<S> {
    pub fn new(store: SharedNoteStore<S>, delay: Duration) -> Self {
        Self {
            store,
            debouncer: Debouncer::new(delay),
            draft: None,
            version: 0,
            saved_version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wrap a store, using its configured autosave delay.
    pub fn for_store(store: NoteStore<S>) -> Self {
        let delay = store.config().autosave_delay();
        Self::new(Arc::new(Mutex::new(store)), delay)
    }

    pub const fn store(&self) -> &SharedNoteStore<S> {
        &self.store
    }

    /// Whether a debounced save is still waiting for the quiet period.
    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether the latest edit has not been applied yet.
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version.load(Ordering::Acquire)
    }

    /// Record an edit and (re)start the quiet-period timer.
    ///
    /// An unsaved draft for a different note is saved right away instead of
    /// being replaced.
    pub fn edit(&mut self, note_id: NoteId, title: impl Into<String>, content: impl Into<String>) {
        if let Some(previous) = self.draft.take() {
            if previous.note_id != note_id && self.is_dirty() {
                self.debouncer.cancel_pending();
                tokio::spawn(apply_draft(
                    Arc::clone(&self.store),
                    previous,
                    Arc::clone(&self.saved_version),
                ));
            }
        }

        self.version += 1;
        let draft = Draft {
            note_id,
            title: title.into(),
            content: content.into(),
            version: self.version,
        };
        self.draft = Some(draft.clone());
        self.debouncer.schedule(apply_draft(
            Arc::clone(&self.store),
            draft,
            Arc::clone(&self.saved_version),
        ));
    }

    /// Apply the latest draft now, bypassing the quiet period.
    ///
    /// Returns `None` when there was nothing unsaved or the note is gone.
    pub async fn save_now(&mut self) -> Result<Option<Note>> {
        self.debouncer.cancel_pending();
        if !self.is_dirty() {
            return Ok(None);
        }
        let Some(draft) = self.draft.clone() else {
            return Ok(None);
        };

        let updated = self
            .store
            .lock()
            .await
            .update_note(&draft.note_id, &draft.title, &draft.content)?;
        self.saved_version
            .fetch_max(draft.version, Ordering::AcqRel);
        tracing::debug!("Saved note {} on demand", draft.note_id);
        Ok(updated)
    }
}

async fn apply_draft<S: KeyValueStore + Send + 'static>(
    store: SharedNoteStore<S>,
    draft: Draft,
    saved_version: Arc<AtomicU64>,
) {
    let result = store
        .lock()
        .await
        .update_note(&draft.note_id, &draft.title, &draft.content);

    match result {
        Ok(_) => {
            saved_version.fetch_max(draft.version, Ordering::AcqRel);
            tracing::debug!("Auto-saved note: {}", draft.note_id);
        }
        Err(error) => {
            tracing::error!("Failed to save note {}: {}", draft.note_id, error);
        }
    }
}
