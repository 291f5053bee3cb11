//! Incremental re-styling
//!
//! Each edit re-runs the classifier over the lines it touched. Line
//! boundaries reset the classifier, so the work normally ends there. If the
//! tag at the end of the region changed anyway, the rest of the buffer is
//! reclassified as a fallback.

use std::ops::Range;

use super::classifier::Classifier;
use super::edit::{EditNotification, EditObserver, RepaintSink, TextSource};
use super::store::StyleStore;
use super::tokens::StyleTag;

/// What a single `on_edit` call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Region reclassified around the edit
    pub region: Range<usize>,
    /// Whether the rest of the buffer was reclassified too
    pub cascaded: bool,
}

/// Owns a document's style buffer and keeps it in step with text edits
#[derive(Debug)]
pub struct IncrementalUpdater<R: RepaintSink = ()> {
    classifier: Classifier<'static>,
    store: StyleStore,
    repaint: R,
}

impl IncrementalUpdater<()> {
    /// Updater with no repaint listener
    pub fn new() -> Self {
        Self::with_sink(())
    }
}

impl Default for IncrementalUpdater<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RepaintSink> IncrementalUpdater<R> {
    /// Create an updater with an empty style buffer
    pub fn with_sink(repaint: R) -> Self {
        Self::with_classifier(Classifier::default(), repaint)
    }

    pub fn with_classifier(classifier: Classifier<'static>, repaint: R) -> Self {
        Self {
            classifier,
            store: StyleStore::new(),
            repaint,
        }
    }

    pub fn store(&self) -> &StyleStore {
        &self.store
    }

    pub fn style_at(&self, pos: usize) -> StyleTag {
        self.store.style_at(pos)
    }

    pub fn sink(&self) -> &R {
        &self.repaint
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.repaint
    }

    /// Discard the style buffer and classify the whole text from scratch
    pub fn restyle_all(&mut self, text: &dyn TextSource) {
        let len = text.len();
        let chars = text.text_range(0, len);
        self.store.reset(self.classifier.classify(&chars));
        self.repaint.repaint(0..len);
        tracing::debug!(len, "restyled whole buffer");
    }

    /// Bring the style buffer up to date after `edit`
    ///
    /// Returns `None` for selection-only notifications.
    pub fn apply_edit(&mut self, text: &dyn TextSource, edit: EditNotification) -> Option<UpdateOutcome> {
        if edit.is_selection_only() {
            return None;
        }

        self.store.splice_edit(edit.position, edit.inserted, edit.deleted);
        debug_assert_eq!(self.store.len(), text.len(), "style buffer out of step with text");

        let len = text.len();
        let start = text.line_start(edit.position.min(len));
        let end = region_end(text, edit.position.saturating_add(edit.inserted).min(len));

        let prior = end.checked_sub(1).and_then(|last| self.store.get(last));
        let tags = self.classifier.classify(&text.text_range(start, end));
        let current = tags.last().copied();
        self.store.write(start, &tags);
        self.repaint.repaint(start..end);

        let cascaded = end > start && current != prior;
        if cascaded {
            let tail = self.classifier.classify(&text.text_range(start, len));
            self.store.write(start, &tail);
            self.repaint.repaint(start..len);
            tracing::debug!(start, end, len, ?prior, ?current, "boundary style changed, restyled to end of buffer");
        }

        tracing::trace!(
            position = edit.position,
            inserted = edit.inserted,
            deleted = edit.deleted,
            start,
            end,
            cascaded,
            "applied edit"
        );

        Some(UpdateOutcome { region: start..end, cascaded })
    }
}

impl<R: RepaintSink> EditObserver for IncrementalUpdater<R> {
    fn on_edit(&mut self, text: &dyn TextSource, edit: EditNotification) {
        self.apply_edit(text, edit);
    }
}

/// End of the line containing `pos`, including its newline when present
fn region_end(text: &dyn TextSource, pos: usize) -> usize {
    let end = text.line_end(pos);
    if end < text.len() {
        end + 1
    } else {
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::syntax::{classify_str, Damage};
    use pretty_assertions::assert_eq;

    fn updater_for(buffer: &TextBuffer) -> IncrementalUpdater<Damage> {
        let mut updater = IncrementalUpdater::with_sink(Damage::new());
        updater.apply_edit(buffer, EditNotification::insert(0, buffer.len()));
        updater.sink_mut().take();
        updater
    }

    fn insert(buffer: &mut TextBuffer, updater: &mut IncrementalUpdater<Damage>, pos: usize, s: &str) -> UpdateOutcome {
        let n = buffer.insert(pos, s);
        updater
            .apply_edit(buffer, EditNotification::insert(pos, n))
            .expect("edit changes text")
    }

    fn delete(buffer: &mut TextBuffer, updater: &mut IncrementalUpdater<Damage>, range: Range<usize>) -> UpdateOutcome {
        let pos = range.start;
        let n = buffer.remove(range).len();
        updater
            .apply_edit(buffer, EditNotification::delete(pos, n))
            .expect("edit changes text")
    }

    fn assert_matches_full(buffer: &TextBuffer, updater: &IncrementalUpdater<Damage>) {
        assert_eq!(updater.store().tags(), classify_str(&buffer.to_string()).as_slice());
    }

    #[test]
    fn test_initial_load_classifies_everything() {
        let buffer = TextBuffer::from("PRINT 1\n' note\nCLS");
        let updater = updater_for(&buffer);
        assert_eq!(updater.store().len(), buffer.len());
        assert_matches_full(&buffer, &updater);
    }

    #[test]
    fn test_selection_change_is_noop() {
        let buffer = TextBuffer::from("PRINT");
        let mut updater = updater_for(&buffer);
        assert_eq!(updater.apply_edit(&buffer, EditNotification::default()), None);
        assert!(updater.sink().is_empty());
    }

    #[test]
    fn test_typing_keyword() {
        let mut buffer = TextBuffer::from("x = 1\nPRIN\ny = 2\n");
        let mut updater = updater_for(&buffer);
        let outcome = insert(&mut buffer, &mut updater, 10, "T");
        assert_eq!(outcome.region, 6..12);
        assert!(!outcome.cascaded);
        assert_eq!(updater.store().letters(6..11), "DDDDD");
        assert_matches_full(&buffer, &updater);
        assert_eq!(updater.sink().ranges(), &[6..12]);
    }

    #[test]
    fn test_opening_quote_cascades() {
        let mut buffer = TextBuffer::from("a = b\nc = d\n");
        let mut updater = updater_for(&buffer);
        let outcome = insert(&mut buffer, &mut updater, 0, "\"");
        assert!(outcome.cascaded);
        assert_eq!(outcome.region, 0..7);
        assert_eq!(updater.store().letters(0..7), "CCCCCCC");
        assert_matches_full(&buffer, &updater);
        assert_eq!(updater.sink().bounds(), Some(0..buffer.len()));
    }

    #[test]
    fn test_closing_quote_changes_newline_tag() {
        // the closing quote keeps its string tag, only the newline changes
        let mut buffer = TextBuffer::from("\"ab\"\nPRINT\n");
        let mut updater = updater_for(&buffer);
        delete(&mut buffer, &mut updater, 0..1);
        assert_eq!(buffer.to_string(), "ab\"\nPRINT\n");
        assert_matches_full(&buffer, &updater);
    }

    #[test]
    fn test_delete_joins_lines() {
        let mut buffer = TextBuffer::from("' comment\nPRINT x\n");
        let mut updater = updater_for(&buffer);
        let outcome = delete(&mut buffer, &mut updater, 9..10);
        assert_eq!(outcome.region, 0..17);
        assert!(updater.store().tags().iter().all(|t| *t == StyleTag::Comment));
        assert_matches_full(&buffer, &updater);
    }

    #[test]
    fn test_multiline_insert() {
        let mut buffer = TextBuffer::from("10 CLS\n");
        let mut updater = updater_for(&buffer);
        insert(&mut buffer, &mut updater, 7, "20 PRINT \"a\nb\" ' c\n30 END");
        assert_eq!(updater.store().len(), buffer.len());
        assert_matches_full(&buffer, &updater);
    }

    #[test]
    fn test_delete_everything() {
        let mut buffer = TextBuffer::from("PRINT\n");
        let mut updater = updater_for(&buffer);
        let outcome = delete(&mut buffer, &mut updater, 0..6);
        assert_eq!(outcome.region, 0..0);
        assert!(!outcome.cascaded);
        assert!(updater.store().is_empty());
    }

    #[test]
    fn test_edit_on_last_line_without_newline() {
        let mut buffer = TextBuffer::from("PRINT\nCL");
        let mut updater = updater_for(&buffer);
        let outcome = insert(&mut buffer, &mut updater, 8, "S");
        // the new character was a plain placeholder before restyling
        assert!(outcome.cascaded);
        assert_eq!(outcome.region, 6..9);
        assert_eq!(updater.store().letters(6..9), "FFF");
        assert_matches_full(&buffer, &updater);
    }

    #[test]
    fn test_edit_contained_to_line() {
        let lines: Vec<String> = (0..100).map(|i| format!("{} PRINT \"line\" ' c", i * 10)).collect();
        let mut buffer = TextBuffer::from((lines.join("\n") + "\n").as_str());
        let mut updater = updater_for(&buffer);

        let line4 = buffer.position_of_line(3);
        let before_tail = updater.store().range(line4..buffer.len()).to_vec();

        let pos = buffer.position_of_line(2) + 1;
        let outcome = insert(&mut buffer, &mut updater, pos, "5");

        assert!(!outcome.cascaded);
        assert_eq!(outcome.region.end, line4 + 1);
        assert_eq!(updater.store().range(line4 + 1..buffer.len()), before_tail.as_slice());
        assert_eq!(updater.sink().ranges(), &[outcome.region.clone()]);
        assert_matches_full(&buffer, &updater);
    }

    #[test]
    fn test_restyle_all() {
        let buffer = TextBuffer::from("CLS\n");
        let mut updater = IncrementalUpdater::with_sink(Damage::new());
        updater.restyle_all(&buffer);
        assert_eq!(updater.store().letters(0..4), "FFFA");
        assert_eq!(updater.sink().ranges(), &[0..4]);
    }
}
