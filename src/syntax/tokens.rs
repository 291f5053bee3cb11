//! Style tags for syntax highlighting
//!
//! Every character of a BASIC buffer carries exactly one of these tags.

use super::style::{Color, Style};

/// Display class attached to a single source character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleTag {
    /// Default/plain text (no special highlighting)
    #[default]
    Plain,
    /// Line comments (', REM, #)
    Comment,
    /// String literals ("...")
    StringLiteral,
    /// Statement and control keywords (PRINT, IF, FOR)
    Keyword,
    /// Built-in functions (LEFT$, SIN), also braces
    Function,
    /// Built-in procedures (CLS, LOCATE)
    Procedure,
}

/// Which catalog a word was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Keyword,
    Function,
    Procedure,
}

impl From<WordClass> for StyleTag {
    fn from(class: WordClass) -> Self {
        match class {
            WordClass::Keyword => StyleTag::Keyword,
            WordClass::Function => StyleTag::Function,
            WordClass::Procedure => StyleTag::Procedure,
        }
    }
}

impl StyleTag {
    pub const COUNT: usize = 6;

    pub const ALL: [StyleTag; StyleTag::COUNT] = [
        StyleTag::Plain,
        StyleTag::Comment,
        StyleTag::StringLiteral,
        StyleTag::Keyword,
        StyleTag::Function,
        StyleTag::Procedure,
    ];

    /// Index into a style table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the default style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            StyleTag::Plain => Style::default(),
            StyleTag::Comment => Style::fg(Color::Rgb(0, 128, 0)),
            StyleTag::StringLiteral => Style::fg(Color::Rgb(0, 0, 192)),
            StyleTag::Keyword => Style::fg(Color::Rgb(128, 0, 0)).with_bold(),
            StyleTag::Function => Style::fg(Color::Rgb(128, 128, 0)).with_bold(),
            StyleTag::Procedure => Style::fg(Color::Rgb(0, 128, 128)).with_bold(),
        }
    }

    /// Single-letter code used in style dumps (`A` = plain .. `F` = procedure)
    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Inverse of [`StyleTag::letter`]
    pub fn from_letter(letter: char) -> Option<Self> {
        let idx = (letter as u32).checked_sub('A' as u32)? as usize;
        Self::ALL.get(idx).copied()
    }

    /// Get the config name for this tag
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Plain => "plain",
            StyleTag::Comment => "comment",
            StyleTag::StringLiteral => "string",
            StyleTag::Keyword => "keyword",
            StyleTag::Function => "function",
            StyleTag::Procedure => "procedure",
        }
    }

    /// Parse a tag from its config name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}
