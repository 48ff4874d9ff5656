//! Tagged note-taking application library
//!
//! This library keeps notes in a hosted database table and provides the
//! repository, search, editor and application state used by the terminal
//! front end.

mod cli;
mod config;
mod editor;
mod errors;
mod filter;
mod helper;
mod note;
mod notifier;
mod repository;
mod shell;
mod store;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use editor::*;
pub use errors::*;
pub use filter::*;
pub use helper::*;
pub use note::*;
pub use notifier::*;
pub use repository::*;
pub use shell::*;
pub use store::*;
pub use types::*;
