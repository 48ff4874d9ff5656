//! Core data structures for the notekeep application.
//!
//! `Note` is the record stored in the remote `notes` table. `NewNote` and
//! `NoteChanges` are the payloads sent to the store on insert and update.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to notes that are created or saved without one.
pub const UNTITLED_NOTE: &str = "Untitled Note";

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note, assigned by the store
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body
    #[serde(default)]
    pub content: String,
    /// Tags for organization, in display order
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Returns true if the note carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Insert payload; the store fills in `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl Default for NewNote {
    fn default() -> Self {
        Self {
            title: UNTITLED_NOTE.to_string(),
            content: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Whole-record overwrite sent to the store when a note is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteChanges {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl NoteChanges {
    /// Builds the overwrite for `note`, stamped with `updated_at`.
    pub fn from_note(note: &Note, updated_at: DateTime<Utc>) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: dedup_tags(&note.tags),
            updated_at,
        }
    }
}

/// Removes repeated tags, keeping the first occurrence of each.
pub fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(tag) {
            unique.push(tag.clone());
        }
    }
    unique
}

/// Returns `title` unless it is blank, in which case the placeholder title.
pub fn title_or_placeholder(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_NOTE.to_string()
    } else {
        trimmed.to_string()
    }
}
