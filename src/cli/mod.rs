//! Terminal front end: one-shot commands, the interactive session and the
//! text renderers they share.

mod app;
mod args;
mod external_editor;
mod interactive;
pub mod render;

pub use app::{handle_config, App};
pub use args::Cli;
pub use external_editor::edit_in_external_editor;
pub use interactive::{parse_command, resolve_target, run_session, ShellCommand};
