//! CLI module for the notekeep application
//!
//! This module runs one-shot commands against the notes shell and manages
//! the configuration file.
use std::{io::stdout, path::Path};

use log::info;
use tokio::io::{stdin, BufReader};

use super::{external_editor::edit_in_external_editor, interactive::run_session, render};
use crate::{
    parse_tags, store::NoteStore, Commands, Config, Note, NoteError, Notifier, NotesShell, Result,
};

/// CLI Application handler - processes CLI commands and interfaces with the shell
pub struct App<S, N> {
    /// Application state over the note store
    shell: NotesShell<S, N>,

    /// Application configuration
    config: Config,
}

impl<S: NoteStore, N: Notifier> App<S, N> {
    /// Create a new CLI application with the given shell and config
    pub fn new(shell: NotesShell<S, N>, config: Config) -> Self {
        Self { shell, config }
    }

    pub fn shell(&self) -> &NotesShell<S, N> {
        &self.shell
    }

    /// Run the CLI application with the given command. One-shot commands
    /// stop here when the notes cannot be loaded; the interactive session
    /// starts anyway and can `reload`.
    pub async fn run(&mut self, command: Commands) -> Result<()> {
        let loaded = self.shell.load().await;
        if !loaded && command != Commands::Shell {
            return Err(NoteError::Fetch {
                message: "the store did not return the notes".to_string(),
            });
        }

        match command {
            Commands::List { search, tag, json } => self.list_notes(search, tag, json)?,

            Commands::Tags => {
                print!(
                    "{}",
                    render::tag_sidebar(&self.shell.tags(), self.shell.active_tag())
                );
            }

            Commands::Show { id, json } => self.show_note(&id, json)?,

            Commands::New {
                title,
                content,
                tags,
            } => self.create_note(title, content, tags).await?,

            Commands::Edit {
                id,
                title,
                content,
                add_tag,
                remove_tag,
                editor,
            } => {
                self.select(&id)?;
                self.apply_edits(title, content, add_tag, remove_tag, editor)?;
                self.save_selected().await?;
            }

            Commands::Delete { id } => self.delete_note(&id).await?,

            Commands::Shell => {
                let input = BufReader::new(stdin());
                run_session(&mut self.shell, input, &mut stdout()).await?;
            }

            Commands::Config { .. } => {
                return Err(NoteError::InvalidInput {
                    message: "config is handled before connecting to the store".to_string(),
                })
            }
        }

        Ok(())
    }

    fn list_notes(&mut self, search: Option<String>, tag: Option<String>, json: bool) -> Result<()> {
        self.shell.set_search(search.unwrap_or_default());
        self.shell.select_tag(tag);

        let notes = self.shell.visible_notes();
        if json {
            println!("{}", serde_json::to_string_pretty(&notes)?);
        } else {
            print!("{}", render::note_list(&notes, None));
        }
        Ok(())
    }

    fn show_note(&self, id: &str, json: bool) -> Result<()> {
        let note = self.find(id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(note)?);
        } else {
            print!("{}", render::note_detail(note));
        }
        Ok(())
    }

    async fn create_note(
        &mut self,
        title: Option<String>,
        content: Option<String>,
        tags: Option<String>,
    ) -> Result<()> {
        let created = self
            .shell
            .new_note()
            .await
            .ok_or_else(|| NoteError::Create {
                message: "the store did not accept the note".to_string(),
            })?;
        println!("Note created with ID: {}", created.id);

        let tags = parse_tags(tags);
        if title.is_some() || content.is_some() || !tags.is_empty() {
            self.apply_edits(title, content, tags, Vec::new(), false)?;
            self.save_selected().await?;
        }
        Ok(())
    }

    async fn delete_note(&mut self, id: &str) -> Result<()> {
        let id = self.find(id)?.id.clone();
        self.shell.delete(&id).await;

        if self.shell.repository().get(&id).is_some() {
            return Err(NoteError::Delete {
                id,
                message: "the store did not delete the note".to_string(),
            });
        }
        Ok(())
    }

    /// Looks a note up by full id or unique id prefix.
    fn find(&self, id: &str) -> Result<&Note> {
        let notes = self.shell.repository().notes();
        if let Some(note) = notes.iter().find(|n| n.id == id) {
            return Ok(note);
        }
        let mut prefixed = notes.iter().filter(|n| n.id.starts_with(id));
        match (prefixed.next(), prefixed.next()) {
            (Some(note), None) => Ok(note),
            _ => Err(NoteError::NoteNotFound { id: id.to_string() }),
        }
    }

    fn select(&mut self, id: &str) -> Result<()> {
        let id = self.find(id)?.id.clone();
        self.shell.select_note(&id);
        Ok(())
    }

    fn apply_edits(
        &mut self,
        title: Option<String>,
        content: Option<String>,
        add_tags: Vec<String>,
        remove_tags: Vec<String>,
        open_editor: bool,
    ) -> Result<()> {
        if content.is_some() && open_editor {
            return Err(NoteError::InvalidInput {
                message: "Cannot specify both --content and --editor".to_string(),
            });
        }

        let config = &self.config;
        let editor = self.shell.editor_mut().ok_or_else(|| NoteError::InvalidInput {
            message: "No note selected".to_string(),
        })?;

        if let Some(title) = title {
            editor.set_title(title);
        }
        if let Some(content) = content {
            editor.set_content(content);
        } else if open_editor {
            let draft = editor.draft().clone();
            let edited = edit_in_external_editor(config, &draft.title, &draft.content)?;
            editor.set_content(edited);
        }
        for tag in &add_tags {
            if !editor.add_tag(tag) {
                info!("Skipping tag '{}': empty or already present", tag);
            }
        }
        for tag in &remove_tags {
            editor.remove_tag(tag);
        }
        Ok(())
    }

    /// Saves the selected draft and reports whether the store took it.
    async fn save_selected(&mut self) -> Result<()> {
        let Some(editor) = self.shell.editor() else {
            return Ok(());
        };
        if !editor.is_dirty() {
            println!("No changes to save");
            return Ok(());
        }

        let id = editor.note_id().to_string();
        if !self.shell.save().await {
            return Err(NoteError::Update {
                id,
                message: "the store did not save the changes".to_string(),
            });
        }
        println!("Note {} updated successfully", id);
        Ok(())
    }
}

/// Handles `config --show/--set/--reset` against the file at `path`.
pub fn handle_config(path: &Path, show: bool, set: Option<String>, reset: bool) -> Result<()> {
    if reset {
        Config::default().save(path)?;
        println!("Configuration reset to defaults");
    }

    let updated = set.is_some();
    if let Some(assignment) = set {
        let mut config = Config::read(path)?;
        config.set(&assignment)?;
        config.save(path)?;
        println!("Updated {}", assignment.split('=').next().unwrap_or_default());
    }

    if show || (!reset && !updated) {
        let config = Config::load(path)?;
        println!("Configuration file: {}", path.display());
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}
