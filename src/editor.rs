//! Unsaved edits to the selected note.
//!
//! An [`EditorSession`] keeps a [`Draft`] next to the values last saved for
//! the note. The session is dirty while the two differ.
use log::trace;

use crate::{note::title_or_placeholder, Note};

/// Editable fields of a note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl From<&Note> for Draft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    note: Note,
    saved: Draft,
    draft: Draft,
}

impl EditorSession {
    /// Opens `note` for editing with a clean draft.
    pub fn open(note: &Note) -> Self {
        let saved = Draft::from(note);
        Self {
            note: note.clone(),
            draft: saved.clone(),
            saved,
        }
    }

    pub fn note_id(&self) -> &str {
        &self.note.id
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// True when the draft differs from the last saved values. Tags are
    /// compared in order, so reordering counts as a change.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn append_content(&mut self, text: &str) {
        if !self.draft.content.is_empty() && !self.draft.content.ends_with('\n') {
            self.draft.content.push('\n');
        }
        self.draft.content.push_str(text);
    }

    /// Whether `input` would be accepted by [`EditorSession::add_tag`].
    pub fn can_add_tag(&self, input: &str) -> bool {
        let tag = input.trim();
        !tag.is_empty() && !self.draft.tags.iter().any(|t| t == tag)
    }

    /// Appends the trimmed tag. Empty input and exact duplicates are
    /// rejected and leave the draft untouched.
    pub fn add_tag(&mut self, input: &str) -> bool {
        if !self.can_add_tag(input) {
            trace!("Rejected tag '{}'", input);
            return false;
        }
        self.draft.tags.push(input.trim().to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.draft.tags.len();
        self.draft.tags.retain(|t| t != tag);
        self.draft.tags.len() != before
    }

    /// The note as it would be saved: draft fields over the opened record,
    /// with a blank title replaced by the placeholder.
    pub fn to_note(&self) -> Note {
        Note {
            title: title_or_placeholder(&self.draft.title),
            content: self.draft.content.clone(),
            tags: self.draft.tags.clone(),
            ..self.note.clone()
        }
    }

    /// Records `saved` as the last saved state and clears the dirty flag.
    pub fn mark_saved(&mut self, saved: &Note) {
        self.note = saved.clone();
        self.saved = Draft::from(saved);
        self.draft = self.saved.clone();
    }
}
