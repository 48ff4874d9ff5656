//! Error types for the notekeep application.
//!
//! This module defines custom error types that categorize the failures that
//! can occur while talking to the note store or driving the application.

use std::io;

use thiserror::Error;

/// The main error type for the notekeep application.
#[derive(Error, Debug)]
pub enum NoteError {
    /// Listing notes from the store failed.
    #[error("Failed to fetch notes: {message}")]
    Fetch { message: String },

    /// Inserting a new note into the store failed.
    #[error("Failed to create note: {message}")]
    Create { message: String },

    /// Overwriting a note in the store failed.
    #[error("Failed to update note {id}: {message}")]
    Update { id: String, message: String },

    /// Removing a note from the store failed.
    #[error("Failed to delete note {id}: {message}")]
    Delete { id: String, message: String },

    /// Transport-level failure talking to the remote store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store answered with a non-success status.
    #[error("Store returned {status}: {message}")]
    Store { status: u16, message: String },

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// User input that cannot be acted upon.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The in-memory store's table lock was poisoned.
    #[error("Lock acquisition failed: {message}")]
    LockAcquisitionFailed { message: String },

    /// The external editor could not be started or exited with an error.
    #[error("Editor error: {message}")]
    EditorError { message: String },
}
