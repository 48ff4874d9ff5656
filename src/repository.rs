//! Notes repository: store operations mirrored into local view state.
//!
//! Every store failure is caught here, logged, turned into one of the
//! `Fetch`/`Create`/`Update`/`Delete` errors and reported through the
//! notifier. Callers observe the outcome through the local state only.
use chrono::Utc;
use log::{debug, error, info};

use crate::{
    store::NoteStore, NewNote, Note, NoteChanges, NoteError, Notification, Notifier, Result,
};

pub struct NotesRepository<S, N> {
    /// The note store backend
    store: S,

    /// Where user-facing messages go
    notifier: N,

    /// Local copy of the table, in store order
    notes: Vec<Note>,

    /// True until the first load completes
    loading: bool,
}

impl<S: NoteStore, N: Notifier> NotesRepository<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            notes: Vec::new(),
            loading: true,
        }
    }

    /// Loaded notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the local notes with the store's. On failure the previous
    /// notes are kept and false is returned.
    pub async fn list(&mut self) -> bool {
        let loaded = match self.fetch_notes().await {
            Ok(notes) => {
                info!("Loaded {} notes", notes.len());
                self.notes = notes;
                true
            }
            Err(e) => {
                error!("Error fetching notes: {}", e);
                self.notifier.notify(Notification::error("Failed to load notes"));
                false
            }
        };
        self.loading = false;
        loaded
    }

    async fn fetch_notes(&self) -> Result<Vec<Note>> {
        let mut notes = self
            .store
            .list_notes()
            .await
            .map_err(|e| NoteError::Fetch {
                message: e.to_string(),
            })?;
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    /// Inserts a note with default fields and puts it at the top of the
    /// list. Returns `None` when the store rejected the insert.
    pub async fn create(&mut self) -> Option<Note> {
        let new_note = NewNote::default();
        let created = self
            .store
            .insert_note(&new_note)
            .await
            .map_err(|e| NoteError::Create {
                message: e.to_string(),
            });

        match created {
            Ok(note) => {
                info!("Created note {}", note.id);
                self.notes.insert(0, note.clone());
                self.notifier.notify(Notification::info(
                    "New note created",
                    "Start writing your thoughts!",
                ));
                Some(note)
            }
            Err(e) => {
                error!("Error creating note: {}", e);
                self.notifier.notify(Notification::error("Failed to create note"));
                None
            }
        }
    }

    /// Overwrites the stored note with `note`'s title, content and tags and
    /// stamps it with the current time. The local entry is replaced in place.
    pub async fn update(&mut self, note: Note) {
        let id = note.id.clone();
        let created_at = self
            .get(&id)
            .map(|existing| existing.created_at)
            .unwrap_or(note.created_at);
        let updated_at = Utc::now().max(created_at);
        let changes = NoteChanges::from_note(&note, updated_at);

        debug!("Saving note {}", id);
        let saved = self
            .store
            .update_note(&id, &changes)
            .await
            .map_err(|e| NoteError::Update {
                id: id.clone(),
                message: e.to_string(),
            });

        match saved {
            Ok(()) => {
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id == id) {
                    *slot = Note {
                        tags: changes.tags,
                        created_at,
                        updated_at,
                        ..note
                    };
                }
                info!("Note saved successfully: {}", id);
                self.notifier.notify(Notification::info(
                    "Note saved",
                    "Your changes have been saved successfully.",
                ));
            }
            Err(e) => {
                error!("Error updating note: {}", e);
                self.notifier.notify(Notification::error("Failed to save note"));
            }
        }
    }

    /// Deletes the note from the store, then from the local list.
    pub async fn delete(&mut self, id: &str) {
        let title = self.get(id).map(|note| note.title.clone());

        let deleted = self
            .store
            .delete_note(id)
            .await
            .map_err(|e| NoteError::Delete {
                id: id.to_string(),
                message: e.to_string(),
            });

        match deleted {
            Ok(()) => {
                self.notes.retain(|note| note.id != id);
                info!("Deleted note {}", id);
                self.notifier.notify(Notification::info(
                    "Note deleted",
                    format!("\"{}\" has been removed.", title.unwrap_or_default()),
                ));
            }
            Err(e) => {
                error!("Error deleting note: {}", e);
                self.notifier.notify(Notification::error("Failed to delete note"));
            }
        }
    }
}
