//! Search and tag filtering over the loaded notes.
use crate::Note;

/// Free-text query plus an optional tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub query: String,
    pub tag: Option<String>,
}

impl NoteFilter {
    pub fn new(query: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            query: query.into(),
            tag,
        }
    }

    /// Case-insensitive substring match on title or content, and exact
    /// membership of the tag when one is set.
    pub fn matches(&self, note: &Note) -> bool {
        let matches_search = self.query.is_empty() || {
            let needle = self.query.to_lowercase();
            note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
        };

        let matches_tag = match &self.tag {
            Some(tag) => note.has_tag(tag),
            None => true,
        };

        matches_search && matches_tag
    }
}

/// Notes matching `filter`, in their original order.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|note| filter.matches(note)).collect()
}

/// Every tag used by any note, once each, in first-seen order.
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in notes.iter().flat_map(|note| note.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}
