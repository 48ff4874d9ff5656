//! Editing note content in the user's own editor through a temp file.
use std::{
    fs::{read_to_string, OpenOptions},
    io::Write,
    path::Path,
    process::Command,
};

use log::info;
use shell_words::split;
use tempfile::Builder;

use crate::{Config, NoteError, Result};

const HEADER_NOTICE: &str =
    "Lines that start with <!-- and end with --> are comments and will be ignored.";

/// Opens `content` in the configured editor and returns the edited text.
pub fn edit_in_external_editor(config: &Config, title: &str, content: &str) -> Result<String> {
    let temp_file = Builder::new().suffix(".md").tempfile()?;
    let temp_path = temp_file.path().to_path_buf();

    write_editor_template(&temp_path, title, content)?;

    let editor_cmd = config.get_editor_command();
    info!("Opening {} to edit note content", editor_cmd);
    launch_editor(&editor_cmd, &temp_path)?;

    let edited = read_to_string(&temp_path)?;
    Ok(process_editor_content(&edited))
}

fn write_editor_template(path: &Path, title: &str, content: &str) -> Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
    writeln!(file, "<!-- Editing \"{}\" -->", title)?;
    writeln!(file, "<!-- {} -->", HEADER_NOTICE)?;
    write!(file, "{}", content)?;
    Ok(())
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| NoteError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let Some((program, rest)) = args.split_first() else {
        return Err(NoteError::EditorError {
            message: "Empty editor command".to_string(),
        });
    };

    let status = Command::new(program)
        .args(rest)
        .arg(file_path)
        .status()
        .map_err(|e| NoteError::EditorError {
            message: format!("Failed to execute editor command: {}", e),
        })?;

    if !status.success() {
        return Err(NoteError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Drops comment lines (`<!-- ... -->`) from what the editor left behind.
fn process_editor_content(content: &str) -> String {
    content
        .lines()
        .filter(|line| {
            let line = line.trim();
            !(line.starts_with("<!--") && line.ends_with("-->"))
        })
        .collect::<Vec<&str>>()
        .join("\n")
}
