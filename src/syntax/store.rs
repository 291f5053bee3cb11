//! Style buffer mirroring a text buffer
//!
//! Holds one [`StyleTag`] per character of the associated text. Text edits
//! are mirrored by splicing `Plain` placeholders in before the updater
//! reclassifies, so lengths stay equal.

use std::ops::Range;

use super::style::Span;
use super::tokens::StyleTag;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleStore {
    tags: Vec<StyleTag>,
}

impl StyleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: Vec<StyleTag>) -> Self {
        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<StyleTag> {
        self.tags.get(pos).copied()
    }

    /// Tag at a position; positions past the end read as `Plain`
    pub fn style_at(&self, pos: usize) -> StyleTag {
        self.get(pos).unwrap_or_default()
    }

    pub fn tags(&self) -> &[StyleTag] {
        &self.tags
    }

    /// Tags in `range`, clamped to the buffer
    pub fn range(&self, range: Range<usize>) -> &[StyleTag] {
        let end = range.end.min(self.tags.len());
        let start = range.start.min(end);
        &self.tags[start..end]
    }

    /// Mirror an insertion: `count` plain tags at `pos`
    pub fn insert(&mut self, pos: usize, count: usize) {
        self.splice_edit(pos, count, 0);
    }

    /// Mirror a deletion of `count` characters at `pos`
    pub fn remove(&mut self, pos: usize, count: usize) {
        self.splice_edit(pos, 0, count);
    }

    /// Mirror a combined replace in one splice
    pub fn splice_edit(&mut self, pos: usize, inserted: usize, deleted: usize) {
        let pos = pos.min(self.tags.len());
        let end = pos.saturating_add(deleted).min(self.tags.len());
        self.tags
            .splice(pos..end, std::iter::repeat(StyleTag::Plain).take(inserted));
    }

    /// Overwrite tags starting at `start`
    pub fn write(&mut self, start: usize, tags: &[StyleTag]) {
        let end = start + tags.len();
        debug_assert!(end <= self.tags.len(), "style write past end of buffer");
        let end = end.min(self.tags.len());
        let start = start.min(end);
        self.tags[start..end].copy_from_slice(&tags[..end - start]);
    }

    /// Replace the whole buffer
    pub fn reset(&mut self, tags: Vec<StyleTag>) {
        self.tags = tags;
    }

    /// Maximal runs of equal tags within `range`
    pub fn spans(&self, range: Range<usize>) -> Vec<Span> {
        let offset = range.start.min(self.tags.len());
        let mut spans: Vec<Span> = Vec::new();
        for (i, tag) in self.range(range).iter().enumerate() {
            let pos = offset + i;
            match spans.last_mut() {
                Some(span) if span.tag == *tag => span.end = pos + 1,
                _ => spans.push(Span::new(pos, pos + 1, *tag)),
            }
        }
        spans
    }

    /// Letter dump of a range (`A`..`F`, see [`StyleTag::letter`])
    pub fn letters(&self, range: Range<usize>) -> String {
        self.range(range).iter().map(|t| t.letter()).collect()
    }
}
