//! The persisted notes table.
//!
//! [`NoteStore`] is the contract the repository depends on: list ordered by
//! creation time (newest first), insert returning the stored record, update
//! by id and delete by id. The store owns identifiers and timestamps.

mod memory;
mod rest;

pub use memory::{MemoryNoteStore, StoreOp};
pub use rest::RestNoteStore;

use async_trait::async_trait;

use crate::{NewNote, Note, NoteChanges, Result};

/// Remote table of note records.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, newest `created_at` first.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Insert a note and return the stored record with its generated fields.
    async fn insert_note(&self, note: &NewNote) -> Result<Note>;

    /// Overwrite title, content, tags and `updated_at` of the note `id`.
    async fn update_note(&self, id: &str, changes: &NoteChanges) -> Result<()>;

    /// Remove the note `id`.
    async fn delete_note(&self, id: &str) -> Result<()>;
}
