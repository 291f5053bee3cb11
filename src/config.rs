//! Configuration file support
//!
//! Loads settings from ~/.basic-highlight.toml (or
//! %USERPROFILE%\.basic-highlight.toml on Windows)
//!
//! Example:
//! ```toml
//! line-numbers = true
//! tab-width = 4
//! color = true
//! exact-search = false
//!
//! [styles.keyword]
//! color = "#800000"
//! font = "courier-bold"
//! size = 14
//!
//! [styles.comment]
//! color = "bright-black"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{EditorError, Result};
use crate::syntax::{Color, Font, StyleTable, StyleTag};

const CONFIG_FILE: &str = ".basic-highlight.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Whether to emit colors at all
    pub color: bool,
    /// Case-sensitive search
    pub exact_search: bool,
    /// Style for each tag
    pub styles: StyleTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            tab_width: 8,
            color: true,
            exact_search: false,
            styles: StyleTable::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed table; unknown keys are ignored
    fn apply(&mut self, table: &Table) -> Result<()> {
        if let Some(value) = table.get("line-numbers") {
            self.show_line_numbers = parse_bool(value, "line-numbers")?;
        }

        if let Some(value) = table.get("tab-width") {
            let n = parse_int(value, "tab-width")?;
            self.tab_width = n.clamp(1, 16) as usize; // Between 1 and 16
        }

        if let Some(value) = table.get("color") {
            self.color = parse_bool(value, "color")?;
        }

        if let Some(value) = table.get("exact-search") {
            self.exact_search = parse_bool(value, "exact-search")?;
        }

        if let Some(styles) = table.get("styles") {
            let styles = styles
                .as_table()
                .ok_or_else(|| EditorError::Config("styles must be a table".to_string()))?;
            for (name, entry) in styles {
                let tag = StyleTag::from_name(name)
                    .ok_or_else(|| EditorError::Config(format!("unknown style '{name}'")))?;
                self.apply_style(tag, entry)?;
            }
        }

        Ok(())
    }

    fn apply_style(&mut self, tag: StyleTag, entry: &Value) -> Result<()> {
        let entry = entry
            .as_table()
            .ok_or_else(|| EditorError::Config(format!("styles.{} must be a table", tag.name())))?;
        let mut style = self.styles.get(tag);

        if let Some(value) = entry.get("color") {
            let text = parse_str(value, "color")?;
            style.fg = Color::parse(text)
                .ok_or_else(|| EditorError::Config(format!("invalid color '{text}'")))?;
        }

        if let Some(value) = entry.get("font") {
            let text = parse_str(value, "font")?;
            style.font = Font::parse(text)
                .ok_or_else(|| EditorError::Config(format!("invalid font '{text}'")))?;
        }

        if let Some(value) = entry.get("size") {
            let n = parse_int(value, "size")?;
            let size = u8::try_from(n)
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| EditorError::Config(format!("invalid font size {n}")))?;
            style = style.with_size(size);
        }

        self.styles.set(tag, style);
        Ok(())
    }
}

/// Parse a boolean; strings like "yes" and "on" are accepted too
fn parse_bool(value: &Value, key: &str) -> Result<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Integer(n) => Ok(*n != 0),
        Value::String(s) => Ok(matches!(s.to_lowercase().as_str(), "true" | "yes" | "on" | "1")),
        _ => Err(EditorError::Config(format!("{key} must be a boolean"))),
    }
}

fn parse_int(value: &Value, key: &str) -> Result<i64> {
    value
        .as_integer()
        .ok_or_else(|| EditorError::Config(format!("{key} must be an integer")))
}

fn parse_str<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| EditorError::Config(format!("{key} must be a string")))
}
