//! Error types for basic-highlight
//!
//! The classifier and updater never fail; everything here comes from the
//! editing and configuration layers around them.

use thiserror::Error;

/// Result type alias for basic-highlight operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer is read-only")]
    ReadOnly,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Position {pos} is outside the buffer (length {len})")]
    InvalidPosition { pos: usize, len: usize },

    #[error("Search string is blank")]
    EmptyPattern,

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}
