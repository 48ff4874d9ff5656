//! One-shot commands run against an in-memory store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use notekeep::{
    App, Commands, Config, MemoryNoteStore, Note, NoteError, NotesRepository, NotesShell,
    RecordingNotifier, StoreOp,
};
use pretty_assertions::assert_eq;

type TestApp = App<MemoryNoteStore, Arc<RecordingNotifier>>;

fn app_with(notes: Vec<Note>) -> TestApp {
    let repository = NotesRepository::new(
        MemoryNoteStore::with_notes(notes),
        Arc::new(RecordingNotifier::new()),
    );
    App::new(NotesShell::new(repository), Config::default())
}

fn sample() -> Note {
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    Note {
        id: "0b7d3c1e".to_string(),
        title: "Welcome to Your Notes".to_string(),
        content: "Start by creating your first note!".to_string(),
        tags: vec!["welcome".to_string(), "getting-started".to_string()],
        created_at: at,
        updated_at: at,
    }
}

fn edit(id: &str, title: Option<&str>, content: Option<&str>, editor: bool) -> Commands {
    Commands::Edit {
        id: id.to_string(),
        title: title.map(str::to_string),
        content: content.map(str::to_string),
        add_tag: Vec::new(),
        remove_tag: Vec::new(),
        editor,
    }
}

#[tokio::test]
async fn new_with_fields_creates_then_saves() {
    let mut app = app_with(Vec::new());
    app.run(Commands::New {
        title: Some("Meeting Notes".to_string()),
        content: Some("Budget allocation".to_string()),
        tags: Some("work, meetings, work".to_string()),
    })
    .await
    .unwrap();

    let notes = app.shell().repository().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Meeting Notes");
    assert_eq!(notes[0].content, "Budget allocation");
    assert_eq!(notes[0].tags, vec!["work", "meetings"]);
}

#[tokio::test]
async fn plain_new_uses_defaults() {
    let mut app = app_with(Vec::new());
    app.run(Commands::New {
        title: None,
        content: None,
        tags: None,
    })
    .await
    .unwrap();

    let notes = app.shell().repository().notes();
    assert_eq!(notes[0].title, "Untitled Note");
    assert!(notes[0].tags.is_empty());
}

#[tokio::test]
async fn edit_by_id_prefix_updates_tags() {
    let mut app = app_with(vec![sample()]);
    let command = Commands::Edit {
        id: "0b7d".to_string(),
        title: None,
        content: None,
        add_tag: vec!["work".to_string()],
        remove_tag: vec!["welcome".to_string()],
        editor: false,
    };
    app.run(command).await.unwrap();

    let saved = app.shell().repository().get("0b7d3c1e").unwrap();
    assert_eq!(saved.tags, vec!["getting-started", "work"]);
    assert!(saved.updated_at > saved.created_at);
}

#[tokio::test]
async fn edit_reports_store_failure() {
    let mut app = app_with(vec![sample()]);
    app.shell().repository().store().fail_on(StoreOp::Update);

    let result = app
        .run(edit("0b7d3c1e", Some("Renamed"), None, false))
        .await;

    assert!(matches!(result, Err(NoteError::Update { .. })));
    assert_eq!(
        app.shell().repository().get("0b7d3c1e").unwrap().title,
        "Welcome to Your Notes"
    );
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let mut app = app_with(vec![sample()]);
    let result = app
        .run(Commands::Delete {
            id: "nope".to_string(),
        })
        .await;
    assert!(matches!(result, Err(NoteError::NoteNotFound { .. })));

    let result = app
        .run(Commands::Show {
            id: "nope".to_string(),
            json: false,
        })
        .await;
    assert!(matches!(result, Err(NoteError::NoteNotFound { .. })));
}

#[tokio::test]
async fn delete_removes_note() {
    let mut app = app_with(vec![sample()]);
    app.run(Commands::Delete {
        id: "0b7d3c1e".to_string(),
    })
    .await
    .unwrap();
    assert!(app.shell().repository().notes().is_empty());
    assert!(app.shell().selected_note().is_none());
}

#[tokio::test]
async fn failed_delete_is_an_error() {
    let mut app = app_with(vec![sample()]);
    app.shell().repository().store().fail_on(StoreOp::Delete);
    let result = app
        .run(Commands::Delete {
            id: "0b7d3c1e".to_string(),
        })
        .await;
    assert!(matches!(result, Err(NoteError::Delete { .. })));
    assert_eq!(app.shell().repository().notes().len(), 1);
}

#[tokio::test]
async fn content_and_editor_flags_conflict() {
    let mut app = app_with(vec![sample()]);
    let result = app
        .run(edit("0b7d3c1e", None, Some("x"), true))
        .await;
    assert!(matches!(result, Err(NoteError::InvalidInput { .. })));
}

#[tokio::test]
async fn one_shot_commands_stop_when_notes_cannot_load() {
    let mut app = app_with(vec![sample()]);
    app.shell().repository().store().fail_on(StoreOp::List);

    let result = app
        .run(Commands::Show {
            id: "0b7d3c1e".to_string(),
            json: false,
        })
        .await;
    assert!(matches!(result, Err(NoteError::Fetch { .. })));

    let result = app.run(edit("0b7d3c1e", Some("Renamed"), None, false)).await;
    assert!(matches!(result, Err(NoteError::Fetch { .. })));
    assert_eq!(app.shell().repository().store().rows()[0].title, "Welcome to Your Notes");
}
