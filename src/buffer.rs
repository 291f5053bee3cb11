//! Text buffer - the characters of one document
//!
//! Positions are character indices. Lines are separated by `\n`; the last
//! line has no terminator unless the text ends with one.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use crate::syntax::TextSource;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Characters in `range`, clamped to the buffer
    pub fn slice(&self, range: Range<usize>) -> &[char] {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        &self.chars[start..end]
    }

    /// Insert text at `pos`, returning the number of characters inserted
    pub fn insert(&mut self, pos: usize, text: &str) -> usize {
        let pos = pos.min(self.chars.len());
        let before = self.chars.len();
        self.chars.splice(pos..pos, text.chars());
        self.chars.len() - before
    }

    /// Remove a range, returning the removed characters
    pub fn remove(&mut self, range: Range<usize>) -> Vec<char> {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars.drain(start..end).collect()
    }

    /// Replace the whole contents, returning the old contents
    pub fn replace_all(&mut self, chars: Vec<char>) -> Vec<char> {
        std::mem::replace(&mut self.chars, chars)
    }

    /// Number of lines (an empty buffer has one empty line)
    pub fn line_count(&self) -> usize {
        self.chars.iter().filter(|c| **c == '\n').count() + 1
    }

    /// Start position of a 0-based line, clamped to the last line
    pub fn position_of_line(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        self.chars
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == '\n')
            .nth(line - 1)
            .map(|(i, _)| i + 1)
            .unwrap_or_else(|| self.line_start(self.chars.len()))
    }

    /// 0-based (row, column) of a position
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.chars.len());
        let row = self.chars[..pos].iter().filter(|c| **c == '\n').count();
        (row, pos - self.line_start(pos))
    }

    /// Text of a 0-based line, without its terminator
    pub fn line_text(&self, line: usize) -> String {
        let start = self.position_of_line(line);
        self.chars[start..self.line_end(start)].iter().collect()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        self.chars.iter().try_for_each(|c| f.write_char(*c))
    }
}

impl TextSource for TextBuffer {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn text_range(&self, start: usize, end: usize) -> Cow<'_, [char]> {
        Cow::Borrowed(self.slice(start..end))
    }

    fn line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.chars.len());
        self.chars[..pos]
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |i| i + 1)
    }

    fn line_end(&self, pos: usize) -> usize {
        let pos = pos.min(self.chars.len());
        self.chars[pos..]
            .iter()
            .position(|c| *c == '\n')
            .map_or(self.chars.len(), |i| pos + i)
    }
}
