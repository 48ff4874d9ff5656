//! In-process notes table with the same contract as the hosted one.
use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, trace};
use uuid::Uuid;

use super::NoteStore;
use crate::{NewNote, Note, NoteChanges, NoteError, Result};

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Note>,
    last_created: Option<DateTime<Utc>>,
    failing: HashSet<StoreOp>,
}

/// Notes table held in memory. Assigns UUIDs and timestamps on insert the
/// way the hosted table does.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    table: Mutex<Table>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given rows already stored.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let last_created = notes.iter().map(|n| n.created_at).max();
        Self {
            table: Mutex::new(Table {
                rows: notes,
                last_created,
                failing: HashSet::new(),
            }),
        }
    }

    /// Makes every subsequent `op` fail until [`MemoryNoteStore::recover`].
    pub fn fail_on(&self, op: StoreOp) {
        if let Ok(mut table) = self.table.lock() {
            table.failing.insert(op);
        }
    }

    /// Clears all injected failures.
    pub fn recover(&self) {
        if let Ok(mut table) = self.table.lock() {
            table.failing.clear();
        }
    }

    /// Copy of the stored rows in insertion order.
    pub fn rows(&self) -> Vec<Note> {
        self.table
            .lock()
            .map(|table| table.rows.clone())
            .unwrap_or_default()
    }

    fn lock(&self, op: StoreOp) -> Result<MutexGuard<'_, Table>> {
        let table = self
            .table
            .lock()
            .map_err(|_| NoteError::LockAcquisitionFailed {
                message: "notes table mutex poisoned".to_string(),
            })?;

        if table.failing.contains(&op) {
            debug!("Injected failure for {:?}", op);
            return Err(NoteError::Store {
                status: 503,
                message: format!("{:?} unavailable", op),
            });
        }
        Ok(table)
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let table = self.lock(StoreOp::List)?;
        let mut notes = table.rows.clone();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn insert_note(&self, note: &NewNote) -> Result<Note> {
        let mut table = self.lock(StoreOp::Insert)?;

        // Creation times stay strictly increasing so ordering is total.
        let mut now = Utc::now();
        if let Some(last) = table.last_created {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        table.last_created = Some(now);

        let created = Note {
            id: Uuid::new_v4().to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        trace!("Inserted note {}", created.id);
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn update_note(&self, id: &str, changes: &NoteChanges) -> Result<()> {
        let mut table = self.lock(StoreOp::Update)?;
        // Unknown ids match zero rows, which is not an error.
        if let Some(row) = table.rows.iter_mut().find(|n| n.id == id) {
            row.title = changes.title.clone();
            row.content = changes.content.clone();
            row.tags = changes.tags.clone();
            row.updated_at = changes.updated_at.max(row.created_at);
        }
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let mut table = self.lock(StoreOp::Delete)?;
        table.rows.retain(|n| n.id != id);
        Ok(())
    }
}
