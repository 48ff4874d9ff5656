//! Shared types for the notekeep application: the crate `Result` alias and
//! the command-line subcommands.
use clap::Subcommand;

use crate::NoteError;

/// A specialized Result type for notekeep operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Available subcommands for the notekeep application
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List notes, newest first
    List {
        /// Only notes whose title or content contains this text
        #[clap(short, long)]
        search: Option<String>,

        /// Only notes carrying this tag
        #[clap(short, long)]
        tag: Option<String>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List every tag in use
    Tags,

    /// Show a single note
    Show {
        /// ID of the note to show
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Create a new note, optionally filling it in right away
    New {
        /// Title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Content of the note
        #[clap(short, long)]
        content: Option<String>,

        /// Tags to add (comma-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// Tag to add (repeatable)
        #[clap(short, long = "add-tag")]
        add_tag: Vec<String>,

        /// Tag to remove (repeatable)
        #[clap(short, long = "remove-tag")]
        remove_tag: Vec<String>,

        /// Open the content in an external editor
        #[clap(short, long)]
        editor: bool,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,
    },

    /// Interactive session with search, tag filter and editor
    Shell,

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
