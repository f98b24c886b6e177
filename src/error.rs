//! Error types for tagedit

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No file name set")]
    NoFileName,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("{0}")]
    Message(String),
}
