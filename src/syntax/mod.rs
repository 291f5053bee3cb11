//! Syntax and styling module
//!
//! This module provides the BASIC highlighting engine:
//! - Keyword catalogs and case-insensitive lookup
//! - The single-pass per-character classifier
//! - The style buffer mirroring the text buffer
//! - Incremental re-styling driven by edit notifications

mod style;
mod tokens;
mod catalog;
mod classifier;
mod store;
mod edit;
mod updater;

pub use style::{Color, Font, Span, Style, StyleTable};
pub use tokens::{StyleTag, WordClass};
pub use catalog::{Catalog, KeywordCatalog, BUILTIN_CATALOG};
pub use classifier::{classify_span, classify_str, Classifier, ScanMode, ScanState, MAX_TOKEN_LEN};
pub use store::StyleStore;
pub use edit::{Damage, EditNotification, EditObserver, RepaintSink, TextSource};
pub use updater::{IncrementalUpdater, UpdateOutcome};
