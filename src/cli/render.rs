//! Text rendering of the note list, tag sidebar and editor.
use std::fmt::Write;

use console::style;

use crate::{content_preview, format_date, EditorSession, Note};

const PREVIEW_CHARS: usize = 80;
const LIST_TAGS: usize = 2;

/// The note list with a count header. `selected` marks one entry.
pub fn note_list(notes: &[&Note], selected: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{} {}",
            notes.len(),
            if notes.len() == 1 { "Note" } else { "Notes" }
        ))
        .bold()
    );

    if notes.is_empty() {
        let _ = writeln!(out, "No notes found");
        let _ = writeln!(out, "Try adjusting your search or tags");
        return out;
    }

    let width = separator_width();
    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out, "{}", "-".repeat(width));
        }
        let marker = if selected == Some(note.id.as_str()) {
            ">"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {:>2}. {}  {}",
            marker,
            i + 1,
            style(&note.title).bold(),
            style(format_date(&note.updated_at)).dim()
        );

        let preview = content_preview(&note.content, PREVIEW_CHARS);
        let _ = writeln!(
            out,
            "      {}",
            if preview.is_empty() {
                "No content".to_string()
            } else {
                preview
            }
        );

        if !note.tags.is_empty() {
            let _ = writeln!(out, "      {}", style(list_tags(&note.tags)).cyan());
        }
    }
    out
}

/// First few tags as `#tag`, then `+N` for the rest.
fn list_tags(tags: &[String]) -> String {
    let mut shown: Vec<String> = tags
        .iter()
        .take(LIST_TAGS)
        .map(|tag| format!("#{}", tag))
        .collect();
    if tags.len() > LIST_TAGS {
        shown.push(format!("+{}", tags.len() - LIST_TAGS));
    }
    shown.join(" ")
}

/// Sidebar with the "All Notes" entry and every tag; the active filter is
/// marked.
pub fn tag_sidebar(tags: &[String], active: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} All Notes",
        if active.is_none() { "*" } else { " " }
    );
    let _ = writeln!(out, "{}", style("Tags").bold());
    if tags.is_empty() {
        let _ = writeln!(out, "  No tags yet");
    }
    for tag in tags {
        let mark = if active == Some(tag.as_str()) { "*" } else { " " };
        let _ = writeln!(out, "{} {}", mark, style(tag).cyan());
    }
    out
}

/// Full view of a stored note.
pub fn note_detail(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(&note.title).bold());
    let _ = writeln!(
        out,
        "ID: {} | Created: {} | Updated: {}",
        note.id,
        note.created_at.format("%Y-%m-%d %H:%M"),
        note.updated_at.format("%Y-%m-%d %H:%M")
    );
    if !note.tags.is_empty() {
        let tags = note
            .tags
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "Tags: {}", style(tags).cyan());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", note.content);
    out
}

/// The draft being edited, with a banner while changes are unsaved.
pub fn editor_view(editor: &EditorSession) -> String {
    let draft = editor.draft();
    let mut out = String::new();
    let title = if draft.title.trim().is_empty() {
        "(untitled)"
    } else {
        draft.title.as_str()
    };
    let _ = writeln!(out, "{}", style(title).bold());
    if draft.tags.is_empty() {
        let _ = writeln!(out, "Tags: (none)");
    } else {
        let _ = writeln!(out, "Tags: {}", style(draft.tags.join(", ")).cyan());
    }
    let _ = writeln!(out);
    if draft.content.is_empty() {
        let _ = writeln!(out, "{}", style("Start writing your note...").dim());
    } else {
        let _ = writeln!(out, "{}", draft.content);
    }
    if editor.is_dirty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("You have unsaved changes").yellow());
    }
    out
}

fn separator_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
        .min(50)
}
