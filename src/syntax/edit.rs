//! Seams between the highlighter and its collaborators
//!
//! The text side is reached through [`TextSource`] and delivers changes via
//! [`EditObserver`]; the painting side listens through [`RepaintSink`].

use std::borrow::Cow;
use std::ops::Range;

/// A single text mutation, reported after the text has changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditNotification {
    /// Where the edit happened, in the new text
    pub position: usize,
    /// Characters inserted at `position`
    pub inserted: usize,
    /// Characters removed at `position`
    pub deleted: usize,
}

impl EditNotification {
    pub fn insert(position: usize, inserted: usize) -> Self {
        Self { position, inserted, deleted: 0 }
    }

    pub fn delete(position: usize, deleted: usize) -> Self {
        Self { position, inserted: 0, deleted }
    }

    pub fn replace(position: usize, inserted: usize, deleted: usize) -> Self {
        Self { position, inserted, deleted }
    }

    /// No characters changed (cursor or selection movement)
    pub fn is_selection_only(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Read access to the text being highlighted
pub trait TextSource {
    /// Length in characters
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Characters in `[start, end)`
    fn text_range(&self, start: usize, end: usize) -> Cow<'_, [char]>;

    /// Start of the line containing `pos`
    fn line_start(&self, pos: usize) -> usize;

    /// Position of the newline ending the line containing `pos`, or the
    /// buffer length on the last line
    fn line_end(&self, pos: usize) -> usize;
}

/// Receives every text edit, in order, after it is applied
pub trait EditObserver {
    fn on_edit(&mut self, text: &dyn TextSource, edit: EditNotification);
}

impl EditObserver for () {
    fn on_edit(&mut self, _text: &dyn TextSource, _edit: EditNotification) {}
}

/// Receives ranges whose styles changed and need repainting
pub trait RepaintSink {
    fn repaint(&mut self, range: Range<usize>);
}

impl RepaintSink for () {
    fn repaint(&mut self, _range: Range<usize>) {}
}

/// Accumulates repaint ranges until the surface collects them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Damage {
    ranges: Vec<Range<usize>>,
}

impl Damage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Smallest range covering everything damaged
    pub fn bounds(&self) -> Option<Range<usize>> {
        let start = self.ranges.iter().map(|r| r.start).min()?;
        let end = self.ranges.iter().map(|r| r.end).max()?;
        Some(start..end)
    }

    /// Drain the collected ranges
    pub fn take(&mut self) -> Vec<Range<usize>> {
        std::mem::take(&mut self.ranges)
    }
}

impl RepaintSink for Damage {
    fn repaint(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        // merge with the previous range when they touch
        if let Some(last) = self.ranges.last_mut() {
            if range.start <= last.end && last.start <= range.end {
                last.start = last.start.min(range.start);
                last.end = last.end.max(range.end);
                return;
            }
        }
        self.ranges.push(range);
    }
}
