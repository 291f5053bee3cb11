//! basic-highlight - incremental syntax highlighting for BASIC source
//!
//! The engine lives in [`syntax`]: a per-character classifier and an updater
//! that keeps a style buffer in step with text edits. [`document`] supplies
//! an editable text model that reports its edits, and [`display`] paints the
//! result on a terminal.

pub mod buffer;
pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod syntax;

pub use buffer::TextBuffer;
pub use config::Config;
pub use document::{Document, DocumentModes, HighlightedDocument};
pub use error::{EditorError, Result};
