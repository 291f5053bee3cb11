//! Single-pass lexical classifier
//!
//! Tags every character of a span with a [`StyleTag`]. State never crosses a
//! newline, so any span that starts at a line boundary classifies exactly as
//! it would inside a full-buffer pass.

use super::catalog::{KeywordCatalog, BUILTIN_CATALOG};
use super::tokens::StyleTag;

/// Longest token the keyword scan will collect
pub const MAX_TOKEN_LEN: usize = 254;

/// Lexical mode within the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Normal,
    InLineComment,
    InString,
}

impl ScanMode {
    /// Tag given to ordinary characters in this mode
    fn tag(self) -> StyleTag {
        match self {
            ScanMode::Normal => StyleTag::Plain,
            ScanMode::InLineComment => StyleTag::Comment,
            ScanMode::InString => StyleTag::StringLiteral,
        }
    }
}

/// Scanner state, reset at every line start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanState {
    pub mode: ScanMode,
    /// Whether the last character was part of a word (suppresses keyword lookup)
    pub prev_word_char: bool,
}

impl ScanState {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '.'
}

fn is_token_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '(' | ')' | '=')
}

/// Classifier bound to a keyword catalog
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'c> {
    catalog: &'c KeywordCatalog,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new(&BUILTIN_CATALOG)
    }
}

impl<'c> Classifier<'c> {
    pub fn new(catalog: &'c KeywordCatalog) -> Self {
        Self { catalog }
    }

    /// Classify a span of text, producing one tag per character
    pub fn classify(&self, text: &[char]) -> Vec<StyleTag> {
        let mut tags = Vec::with_capacity(text.len());
        let mut state = ScanState::default();
        let mut pos = 0;

        while pos < text.len() {
            let ch = text[pos];
            let next = text.get(pos + 1).copied();

            match state.mode {
                ScanMode::InLineComment => {
                    tags.push(StyleTag::Comment);
                    pos += 1;
                }
                ScanMode::InString | ScanMode::Normal if ch == '\\' && next == Some('"') => {
                    // escaped quote never opens or closes a string
                    let tag = state.mode.tag();
                    tags.push(tag);
                    tags.push(tag);
                    pos += 2;
                    continue;
                }
                ScanMode::InString => {
                    tags.push(StyleTag::StringLiteral);
                    pos += 1;
                    if ch == '"' {
                        state.mode = ScanMode::Normal;
                        continue;
                    }
                    state.prev_word_char = is_word_char(ch);
                }
                ScanMode::Normal => {
                    if self.starts_comment(text, pos, state.prev_word_char) {
                        state.mode = ScanMode::InLineComment;
                        tags.push(StyleTag::Comment);
                        pos += 1;
                    } else if ch == '"' {
                        state.mode = ScanMode::InString;
                        tags.push(StyleTag::StringLiteral);
                        pos += 1;
                        state.prev_word_char = false;
                    } else {
                        if !state.prev_word_char {
                            if let Some(len) = self.match_word(text, pos, &mut tags) {
                                pos += len;
                                state.prev_word_char = true;
                                continue;
                            }
                        }
                        tags.push(match ch {
                            '{' | '}' => StyleTag::Function,
                            _ => StyleTag::Plain,
                        });
                        pos += 1;
                        state.prev_word_char = is_word_char(ch);
                    }
                }
            }

            if ch == '\n' {
                state.reset();
            }
        }

        debug_assert_eq!(tags.len(), text.len());
        tags
    }

    /// `#` (not before a digit), `'`, or a standalone `rem`
    fn starts_comment(&self, text: &[char], pos: usize, prev_word_char: bool) -> bool {
        match text[pos] {
            '#' => !text.get(pos + 1).is_some_and(|c| c.is_ascii_digit()),
            '\'' => true,
            // `rem` counts only as a whole token, so `premium` and `remark` stay plain
            'r' | 'R' if !prev_word_char => {
                let Some(word) = text.get(pos..pos + 3) else {
                    return false;
                };
                let is_rem = word.iter().map(|c| c.to_ascii_lowercase()).eq("rem".chars());
                is_rem && !text.get(pos + 3).is_some_and(|c| is_word_char(*c))
            }
            _ => false,
        }
    }

    /// Maximal-munch keyword scan; on a hit pushes the tags and returns the token length
    fn match_word(&self, text: &[char], pos: usize, tags: &mut Vec<StyleTag>) -> Option<usize> {
        let len = text[pos..]
            .iter()
            .take(MAX_TOKEN_LEN)
            .take_while(|c| !is_token_delimiter(**c))
            .count();
        let class = self.catalog.classify(&text[pos..pos + len])?;
        tags.extend(std::iter::repeat(StyleTag::from(class)).take(len));
        Some(len)
    }
}

/// Classify a span using the built-in catalog
pub fn classify_span(text: &[char]) -> Vec<StyleTag> {
    Classifier::default().classify(text)
}

/// Classify a string using the built-in catalog
pub fn classify_str(text: &str) -> Vec<StyleTag> {
    let chars: Vec<char> = text.chars().collect();
    classify_span(&chars)
}
