//! Application state: which note is selected, what the user is searching
//! for, which tag is active, and the editor for the selected note.
use log::{debug, info, warn};

use crate::{
    filter::{all_tags, filter_notes, NoteFilter},
    store::NoteStore,
    EditorSession, Note, Notifier, NotesRepository,
};

pub struct NotesShell<S, N> {
    repository: NotesRepository<S, N>,
    selected: Option<String>,
    filter: NoteFilter,
    editor: Option<EditorSession>,
}

impl<S: NoteStore, N: Notifier> NotesShell<S, N> {
    pub fn new(repository: NotesRepository<S, N>) -> Self {
        Self {
            repository,
            selected: None,
            filter: NoteFilter::default(),
            editor: None,
        }
    }

    pub fn repository(&self) -> &NotesRepository<S, N> {
        &self.repository
    }

    /// Fetches the notes and selects the first one if the current selection
    /// is empty or no longer exists. Returns false when the fetch failed.
    pub async fn load(&mut self) -> bool {
        let loaded = self.repository.list().await;

        let still_there = self
            .selected
            .as_deref()
            .is_some_and(|id| self.repository.get(id).is_some());
        if !still_there {
            let first = self.repository.notes().first().map(|n| n.id.clone());
            self.select(first);
        }
        loaded
    }

    /// Notes matching the search and tag filter, newest first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(self.repository.notes(), &self.filter)
    }

    /// Every tag in use, for the sidebar.
    pub fn tags(&self) -> Vec<String> {
        all_tags(self.repository.notes())
    }

    pub fn search(&self) -> &str {
        &self.filter.query
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        debug!("Search set to '{}'", self.filter.query);
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.filter.tag.as_deref()
    }

    pub fn select_tag(&mut self, tag: Option<String>) {
        debug!("Tag filter set to {:?}", tag);
        self.filter.tag = tag;
    }

    /// Activates `tag`, or clears the filter when it is already active.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.active_tag() == Some(tag) {
            self.select_tag(None);
        } else {
            self.select_tag(Some(tag.to_string()));
        }
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected
            .as_deref()
            .and_then(|id| self.repository.get(id))
    }

    /// Selects the note `id`, discarding any unsaved draft. Returns false
    /// when no such note is loaded.
    pub fn select_note(&mut self, id: &str) -> bool {
        if self.repository.get(id).is_none() {
            return false;
        }
        self.select(Some(id.to_string()));
        true
    }

    fn select(&mut self, id: Option<String>) {
        if let Some(editor) = &self.editor {
            if editor.is_dirty() && Some(editor.note_id()) != id.as_deref() {
                debug!("Discarding unsaved draft for {}", editor.note_id());
            }
        }
        self.editor = id
            .as_deref()
            .and_then(|id| self.repository.get(id))
            .map(EditorSession::open);
        self.selected = id;
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorSession> {
        self.editor.as_mut()
    }

    /// Creates a note and selects it. Nothing is selected when the store
    /// rejects the insert.
    pub async fn new_note(&mut self) -> Option<Note> {
        let created = self.repository.create().await?;
        self.select(Some(created.id.clone()));
        Some(created)
    }

    /// Saves the draft of the selected note and returns whether the store
    /// took it. Without pending changes nothing is sent and the result is
    /// true. A rejected save leaves the draft and its dirty flag in place.
    pub async fn save(&mut self) -> bool {
        let Some(editor) = self.editor.as_ref() else {
            return true;
        };
        if !editor.is_dirty() {
            debug!("Nothing to save for {}", editor.note_id());
            return true;
        }

        let draft_note = editor.to_note();
        self.repository.update(draft_note.clone()).await;

        let saved = self
            .repository
            .get(&draft_note.id)
            .filter(|stored| {
                stored.title == draft_note.title
                    && stored.content == draft_note.content
                    && stored.tags == draft_note.tags
            })
            .cloned();

        match (saved, self.editor.as_mut()) {
            (Some(saved), Some(editor)) => {
                editor.mark_saved(&saved);
                true
            }
            _ => {
                warn!("Keeping unsaved draft for {}", draft_note.id);
                false
            }
        }
    }

    /// Deletes the note `id`. When it was selected, the first remaining
    /// note becomes selected, or nothing when none remain.
    pub async fn delete(&mut self, id: &str) {
        let was_selected = self.selected.as_deref() == Some(id);
        self.repository.delete(id).await;

        if was_selected && self.repository.get(id).is_none() {
            let next = self.repository.notes().first().map(|n| n.id.clone());
            info!("Selection moved to {:?}", next);
            self.select(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{MemoryNoteStore, RecordingNotifier, StoreOp};

    type TestShell = NotesShell<MemoryNoteStore, Arc<RecordingNotifier>>;

    fn note(id: &str, title: &str, tags: &[&str], hour: i64) -> Note {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::hours(hour);
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: at,
            updated_at: at,
        }
    }

    async fn shell_with(notes: Vec<Note>) -> TestShell {
        let repository = NotesRepository::new(
            MemoryNoteStore::with_notes(notes),
            Arc::new(RecordingNotifier::new()),
        );
        let mut shell = NotesShell::new(repository);
        shell.load().await;
        shell
    }

    fn selected_id(shell: &TestShell) -> Option<String> {
        shell.selected_note().map(|n| n.id.clone())
    }

    #[tokio::test]
    async fn load_selects_newest_note() {
        let shell = shell_with(vec![note("a", "A", &[], 0), note("b", "B", &[], 1)]).await;
        assert_eq!(selected_id(&shell).as_deref(), Some("b"));
        assert_eq!(shell.editor().map(|e| e.note_id()), Some("b"));
    }

    #[tokio::test]
    async fn deleting_selected_note_falls_back_to_first_remaining() {
        let mut shell = shell_with(vec![
            note("a", "A", &[], 0),
            note("b", "B", &[], 1),
            note("c", "C", &[], 2),
        ])
        .await;
        assert!(shell.select_note("b"));

        shell.delete("b").await;
        assert_eq!(selected_id(&shell).as_deref(), Some("c"));

        shell.delete("c").await;
        assert_eq!(selected_id(&shell).as_deref(), Some("a"));

        shell.delete("a").await;
        assert!(shell.selected_note().is_none());
        assert!(shell.editor().is_none());
    }

    #[tokio::test]
    async fn deleting_other_note_keeps_selection() {
        let mut shell = shell_with(vec![note("a", "A", &[], 0), note("b", "B", &[], 1)]).await;
        shell.delete("a").await;
        assert_eq!(selected_id(&shell).as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn failed_delete_keeps_selection() {
        let mut shell = shell_with(vec![note("a", "A", &[], 0)]).await;
        shell.repository().store().fail_on(StoreOp::Delete);
        shell.delete("a").await;
        assert_eq!(selected_id(&shell).as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn new_note_is_selected() {
        let mut shell = shell_with(vec![note("a", "A", &[], 0)]).await;
        let created = shell.new_note().await.unwrap();
        assert_eq!(selected_id(&shell), Some(created.id.clone()));
        assert_eq!(shell.visible_notes()[0].id, created.id);
    }

    #[tokio::test]
    async fn failed_create_keeps_collection_and_selection() {
        let mut shell = shell_with(vec![note("a", "A", &[], 0)]).await;
        shell.repository().store().fail_on(StoreOp::Insert);

        assert!(shell.new_note().await.is_none());
        assert_eq!(shell.repository().notes().len(), 1);
        assert_eq!(selected_id(&shell).as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn save_commits_draft_and_clears_dirty_flag() {
        let mut shell = shell_with(vec![note("a", "A", &[], 0)]).await;
        let editor = shell.editor_mut().unwrap();
        editor.set_title("  ");
        editor.set_content("written");
        editor.add_tag("work");
        assert!(shell.editor().unwrap().is_dirty());

        shell.save().await;

        let editor = shell.editor().unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(editor.draft().title, "Untitled Note");
        let stored = shell.selected_note().unwrap();
        assert_eq!(stored.content, "written");
        assert_eq!(stored.tags, vec!["work"]);
        assert_eq!(shell.tags(), vec!["work"]);
    }

    #[tokio::test]
    async fn failed_save_keeps_draft_and_dirty_flag() {
        let mut shell = shell_with(vec![Note {
            content: "Y".to_string(),
            ..note("a", "X", &[], 0)
        }])
        .await;
        shell
            .editor_mut()
            .unwrap()
            .set_content("typed a long paragraph");
        shell.repository().store().fail_on(StoreOp::Update);

        assert!(!shell.save().await);

        let editor = shell.editor().unwrap();
        assert_eq!(editor.draft().content, "typed a long paragraph");
        assert!(editor.is_dirty());
        assert_eq!(shell.selected_note().unwrap().content, "Y");

        shell.repository().store().recover();
        assert!(shell.save().await);
        assert!(!shell.editor().unwrap().is_dirty());
        assert_eq!(
            shell.selected_note().unwrap().content,
            "typed a long paragraph"
        );
    }

    #[tokio::test]
    async fn switching_selection_discards_draft() {
        let mut shell = shell_with(vec![note("a", "A", &[], 0), note("b", "B", &[], 1)]).await;
        shell.editor_mut().unwrap().set_title("Unsaved");
        shell.select_note("a");
        shell.select_note("b");

        assert_eq!(shell.editor().unwrap().draft().title, "B");
        assert_eq!(shell.selected_note().unwrap().title, "B");
    }

    #[tokio::test]
    async fn search_and_tag_filters_combine() {
        let mut shell = shell_with(vec![
            note("a", "Alpha", &["work"], 0),
            note("b", "Beta", &["home"], 1),
        ])
        .await;

        shell.set_search("alp");
        let ids: Vec<&str> = shell.visible_notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);

        shell.set_search("");
        shell.toggle_tag("home");
        let ids: Vec<&str> = shell.visible_notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);

        shell.toggle_tag("home");
        assert_eq!(shell.active_tag(), None);
        assert_eq!(shell.visible_notes().len(), 2);
    }

    #[tokio::test]
    async fn unknown_note_cannot_be_selected() {
        let mut shell = shell_with(vec![note("a", "A", &[], 0)]).await;
        assert!(!shell.select_note("zzz"));
        assert_eq!(selected_id(&shell).as_deref(), Some("a"));
    }
}
