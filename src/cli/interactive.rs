//! Line-oriented interactive session over a [`NotesShell`].
//!
//! Each input line is one user action: change the search, toggle a tag,
//! pick a note, edit the draft, save or delete.
use std::io::Write;

use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::render;
use crate::{store::NoteStore, EditorSession, NoteError, Notifier, NotesShell, Result};

const HELP: &str = "\
Commands:
  list                 show the notes matching the current search and tag
  tags                 show the tag sidebar
  search [text]        filter by title/content (no text clears the search)
  tag [name]           toggle the tag filter (no name shows all notes)
  all                  clear the tag filter
  open <n|id>          select a note by list position or id
  show                 show the selected note's draft
  new                  create a note and select it
  title <text>         set the draft title
  content <text>       replace the draft content
  append <text>        add a line to the draft content
  addtag <tag>         add a tag to the draft
  rmtag <tag>          remove a tag from the draft
  save                 save the draft
  delete [n|id]        delete a note (default: the selected one)
  reload               fetch the notes again
  help                 show this help
  quit                 leave the session";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Tags,
    Search(String),
    Tag(Option<String>),
    Open(String),
    Show,
    New,
    Title(String),
    Content(String),
    Append(String),
    AddTag(String),
    RemoveTag(String),
    Save,
    Delete(Option<String>),
    Reload,
    Help,
    Quit,
}

/// Parses one input line. The first word is the command, the rest of the
/// line is its argument.
pub fn parse_command(line: &str) -> Result<ShellCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = || {
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    };
    let required = |what: &str| {
        arg().ok_or_else(|| NoteError::InvalidInput {
            message: format!("'{}' needs {}", word, what),
        })
    };

    let command = match word.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List,
        "tags" => ShellCommand::Tags,
        "search" | "find" => ShellCommand::Search(rest.to_string()),
        "tag" => ShellCommand::Tag(arg()),
        "all" => ShellCommand::Tag(None),
        "open" | "select" => ShellCommand::Open(required("a note number or id")?),
        "show" => ShellCommand::Show,
        "new" => ShellCommand::New,
        // Titles and content may legitimately be cleared.
        "title" => ShellCommand::Title(rest.to_string()),
        "content" => ShellCommand::Content(rest.to_string()),
        "append" => ShellCommand::Append(rest.to_string()),
        "addtag" => ShellCommand::AddTag(required("a tag")?),
        "rmtag" => ShellCommand::RemoveTag(required("a tag")?),
        "save" => ShellCommand::Save,
        "delete" | "rm" => ShellCommand::Delete(arg()),
        "reload" => ShellCommand::Reload,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => {
            return Err(NoteError::InvalidInput {
                message: format!("Unknown command '{}'. Type 'help' for a list.", other),
            })
        }
    };
    Ok(command)
}

/// Maps a list position (1-based, over the visible notes), a full id or a
/// unique id prefix to a note id.
pub fn resolve_target<S: NoteStore, N: Notifier>(
    shell: &NotesShell<S, N>,
    target: &str,
) -> Option<String> {
    if let Ok(position) = target.parse::<usize>() {
        if let Some(note) = position
            .checked_sub(1)
            .and_then(|i| shell.visible_notes().get(i).copied())
        {
            return Some(note.id.clone());
        }
    }

    let notes = shell.repository().notes();
    if let Some(note) = notes.iter().find(|n| n.id == target) {
        return Some(note.id.clone());
    }

    let mut prefixed = notes.iter().filter(|n| n.id.starts_with(target));
    match (prefixed.next(), prefixed.next()) {
        (Some(only), None) => Some(only.id.clone()),
        _ => None,
    }
}

/// Reads commands from `input` until it ends or the user quits. Output is
/// written to `out`; notifications go through the shell's notifier.
pub async fn run_session<S, N, R, W>(
    shell: &mut NotesShell<S, N>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: NoteStore,
    N: Notifier,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "Type 'help' for commands.")?;

    loop {
        let dirty = shell.editor().is_some_and(|e| e.is_dirty());
        write!(out, "notes{}> ", if dirty { "*" } else { "" })?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        debug!("Session command: {:?}", command);

        if command == ShellCommand::Quit {
            break;
        }
        execute(shell, command, out).await?;
    }

    Ok(())
}

async fn execute<S, N, W>(
    shell: &mut NotesShell<S, N>,
    command: ShellCommand,
    out: &mut W,
) -> Result<()>
where
    S: NoteStore,
    N: Notifier,
    W: Write,
{
    match command {
        ShellCommand::Empty | ShellCommand::Quit => {}
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::List => print_list(shell, out)?,
        ShellCommand::Tags => write!(
            out,
            "{}",
            render::tag_sidebar(&shell.tags(), shell.active_tag())
        )?,
        ShellCommand::Search(query) => {
            shell.set_search(query);
            print_list(shell, out)?;
        }
        ShellCommand::Tag(Some(tag)) => {
            shell.toggle_tag(&tag);
            print_list(shell, out)?;
        }
        ShellCommand::Tag(None) => {
            shell.select_tag(None);
            print_list(shell, out)?;
        }
        ShellCommand::Open(target) => match resolve_target(shell, &target) {
            Some(id) => {
                shell.select_note(&id);
                print_editor(shell, out)?;
            }
            None => writeln!(out, "No note matches '{}'", target)?,
        },
        ShellCommand::Show => print_editor(shell, out)?,
        ShellCommand::New => {
            if shell.new_note().await.is_some() {
                print_editor(shell, out)?;
            }
        }
        ShellCommand::Title(title) => {
            edit(shell, out, |e| {
                e.set_title(title);
                true
            })?;
        }
        ShellCommand::Content(content) => {
            edit(shell, out, |e| {
                e.set_content(content);
                true
            })?;
        }
        ShellCommand::Append(text) => {
            edit(shell, out, |e| {
                e.append_content(&text);
                true
            })?;
        }
        ShellCommand::AddTag(tag) => {
            let added = edit(shell, out, |e| e.add_tag(&tag))?;
            if !added {
                writeln!(out, "Tag '{}' is empty or already present", tag.trim())?;
            }
        }
        ShellCommand::RemoveTag(tag) => {
            let removed = edit(shell, out, |e| e.remove_tag(&tag))?;
            if !removed {
                writeln!(out, "Tag '{}' is not on this note", tag)?;
            }
        }
        ShellCommand::Save => match shell.editor().map(|e| e.is_dirty()) {
            None => writeln!(out, "No note selected")?,
            Some(false) => writeln!(out, "No changes to save")?,
            Some(true) => {
                if !shell.save().await {
                    writeln!(out, "Changes not saved; the draft is kept")?;
                }
            }
        },
        ShellCommand::Delete(target) => {
            let id = match target {
                Some(target) => resolve_target(shell, &target),
                None => shell.selected_note().map(|n| n.id.clone()),
            };
            match id {
                Some(id) => shell.delete(&id).await,
                None => writeln!(out, "No note to delete")?,
            }
        }
        ShellCommand::Reload => {
            shell.load().await;
            print_list(shell, out)?;
        }
    }
    Ok(())
}

/// Applies `change` to the selected note's draft. Returns what `change`
/// returned, or false when nothing is selected.
fn edit<S, N, W, F>(shell: &mut NotesShell<S, N>, out: &mut W, change: F) -> Result<bool>
where
    S: NoteStore,
    N: Notifier,
    W: Write,
    F: FnOnce(&mut EditorSession) -> bool,
{
    match shell.editor_mut() {
        Some(editor) => Ok(change(editor)),
        None => {
            writeln!(out, "No note selected")?;
            Ok(false)
        }
    }
}

fn print_list<S: NoteStore, N: Notifier, W: Write>(
    shell: &NotesShell<S, N>,
    out: &mut W,
) -> Result<()> {
    if !shell.search().is_empty() {
        writeln!(out, "Search: {}", shell.search())?;
    }
    if let Some(tag) = shell.active_tag() {
        writeln!(out, "Tag: {}", tag)?;
    }
    let selected = shell.selected_note().map(|n| n.id.as_str());
    write!(out, "{}", render::note_list(&shell.visible_notes(), selected))?;
    Ok(())
}

fn print_editor<S: NoteStore, N: Notifier, W: Write>(
    shell: &NotesShell<S, N>,
    out: &mut W,
) -> Result<()> {
    match shell.editor() {
        Some(editor) => write!(out, "{}", render::editor_view(editor))?,
        None => {
            writeln!(out, "No note selected")?;
            writeln!(out, "Choose a note from the list or create a new one")?;
        }
    }
    Ok(())
}
