//! Document - a text buffer with file association, undo and search
//!
//! Every mutation goes through [`Document::replace`] or
//! [`Document::set_text`], and each one notifies the observer exactly once
//! after the text has changed.

use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};

use crate::buffer::TextBuffer;
use crate::error::{EditorError, Result};
use crate::syntax::{EditNotification, EditObserver, IncrementalUpdater, RepaintSink, StyleStore, StyleTag};

/// Document flags
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentModes {
    pub read_only: bool, // Reject all edits
    pub exact: bool,     // Exact case matching for search
}

/// A document whose edits are reported to an observer
#[derive(Debug)]
pub struct Document<O: EditObserver = ()> {
    text: TextBuffer,
    observer: O,
    /// Associated file path (None for unnamed documents)
    filename: Option<PathBuf>,
    /// Whether the document has unsaved changes
    modified: bool,
    modes: DocumentModes,
    /// Text as it was before the last edit
    undo: Option<Vec<char>>,
}

/// A document that keeps its own style buffer
pub type HighlightedDocument<R = ()> = Document<IncrementalUpdater<R>>;

impl<O: EditObserver> Document<O> {
    /// Create an empty, unnamed document
    pub fn new(observer: O) -> Self {
        Self {
            text: TextBuffer::new(),
            observer,
            filename: None,
            modified: false,
            modes: DocumentModes::default(),
            undo: None,
        }
    }

    /// Create a document from file contents
    pub fn open(path: &Path, observer: O) -> Result<Self> {
        let mut doc = Self::new(observer);
        doc.load_file(path)?;
        Ok(doc)
    }

    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display name: the file name, or "untitled"
    pub fn name(&self) -> String {
        self.filename
            .as_deref()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn modes(&self) -> &DocumentModes {
        &self.modes
    }

    pub fn modes_mut(&mut self) -> &mut DocumentModes {
        &mut self.modes
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    fn check_editable(&self) -> Result<()> {
        if self.modes.read_only {
            return Err(EditorError::ReadOnly);
        }
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        let len = self.text.len();
        if range.start > range.end || range.end > len {
            return Err(EditorError::InvalidPosition { pos: range.end.max(range.start), len });
        }
        Ok(())
    }

    fn notify(&mut self, edit: EditNotification) {
        self.observer.on_edit(&self.text, edit);
    }

    /// Replace `range` with `text` as a single edit
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        self.check_editable()?;
        self.check_range(&range)?;

        if range.is_empty() && text.is_empty() {
            return Ok(());
        }

        self.undo = Some(self.text.chars().to_vec());
        let deleted = self.text.remove(range.clone()).len();
        let inserted = self.text.insert(range.start, text);
        self.modified = true;
        self.notify(EditNotification::replace(range.start, inserted, deleted));
        Ok(())
    }

    /// Insert text at a position
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        self.replace(pos..pos, text)
    }

    /// Delete a range of text
    pub fn delete(&mut self, range: Range<usize>) -> Result<()> {
        self.replace(range, "")
    }

    /// Replace the whole text without marking the document modified
    pub fn set_text(&mut self, text: &str) {
        let old = self.text.replace_all(text.chars().collect());
        self.undo = None;
        self.modified = false;
        let edit = EditNotification::replace(0, self.text.len(), old.len());
        if !edit.is_selection_only() {
            self.notify(edit);
        }
    }

    /// Load a file, replacing the current text
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let contents = read_file(path)?;
        self.set_text(&contents);
        self.filename = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), len = self.text.len(), "loaded document");
        Ok(())
    }

    /// Insert a file's contents at a position
    pub fn insert_file(&mut self, pos: usize, path: &Path) -> Result<()> {
        self.check_editable()?;
        let contents = read_file(path)?;
        self.insert(pos, &contents)
    }

    /// Save to the associated file
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self
            .filename
            .clone()
            .ok_or_else(|| EditorError::Message("No file name".to_string()))?;
        self.save_as(&path)
    }

    /// Save to a new path, adding a `.bas` extension when missing
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        let path = with_bas_extension(path);
        fs::write(&path, self.text.to_string())?;
        self.filename = Some(path.clone());
        self.modified = false;
        tracing::debug!(path = %path.display(), "saved document");
        Ok(path)
    }

    /// Restore the text from before the last edit
    ///
    /// Only one level is kept. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        self.check_editable()?;
        let Some(previous) = self.undo.take() else {
            return Ok(false);
        };
        let old = self.text.replace_all(previous);
        self.modified = true;
        self.notify(EditNotification::replace(0, self.text.len(), old.len()));
        tracing::debug!(len = self.text.len(), "undo");
        Ok(true)
    }

    fn search_pattern(&self, needle: &str) -> Result<Regex> {
        if needle.is_empty() {
            return Err(EditorError::EmptyPattern);
        }
        Ok(RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(!self.modes.exact)
            .build()?)
    }

    /// Find the next occurrence of `needle` at or after `from`
    pub fn find_next(&self, from: usize, needle: &str) -> Result<Option<Range<usize>>> {
        let pattern = self.search_pattern(needle)?;
        Ok(find_from(&pattern, self.text.chars(), from))
    }

    /// Replace the next occurrence of `find` at or after `from`
    ///
    /// Returns the range of the inserted replacement.
    pub fn replace_next(&mut self, from: usize, find: &str, with: &str) -> Result<Option<Range<usize>>> {
        self.check_editable()?;
        let pattern = self.search_pattern(find)?;
        let Some(found) = find_from(&pattern, self.text.chars(), from) else {
            return Ok(None);
        };
        self.replace(found.clone(), with)?;
        let end = found.start + with.chars().count();
        Ok(Some(found.start..end))
    }

    /// Replace every occurrence of `find`, returning how many were replaced
    pub fn replace_all(&mut self, find: &str, with: &str) -> Result<usize> {
        self.check_editable()?;
        let pattern = self.search_pattern(find)?;
        let with_len = with.chars().count();
        let mut pos = 0;
        let mut times = 0;

        while let Some(found) = find_from(&pattern, self.text.chars(), pos) {
            self.replace(found.clone(), with)?;
            pos = found.start + with_len;
            times += 1;
        }

        tracing::debug!(find, with, times, "replace all");
        Ok(times)
    }

    /// Start position of a 1-based line, clamped to the document
    pub fn goto_line(&self, line: usize) -> usize {
        let line = line.clamp(1, self.text.line_count());
        self.text.position_of_line(line - 1)
    }

    /// 0-based (row, column) of a position
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        self.text.line_col(pos)
    }
}

impl<R: RepaintSink> Document<IncrementalUpdater<R>> {
    /// Style of the character at `pos`
    pub fn style_at(&self, pos: usize) -> StyleTag {
        self.observer.style_at(pos)
    }

    pub fn styles(&self) -> &StyleStore {
        self.observer.store()
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => EditorError::FileNotFound(path.display().to_string()),
        _ => EditorError::Io(e),
    })
}

/// Append `.bas` unless the path already ends in it (any case)
fn with_bas_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bas"));
    if has_ext {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".bas");
    PathBuf::from(name)
}

/// Match `pattern` against the text from `from`, in character positions
fn find_from(pattern: &Regex, chars: &[char], from: usize) -> Option<Range<usize>> {
    let from = from.min(chars.len());
    let haystack: String = chars[from..].iter().collect();
    let found = pattern.find(&haystack)?;
    let start = from + haystack[..found.start()].chars().count();
    Some(start..start + found.as_str().chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{classify_str, Damage, TextSource};

    /// Records every notification it receives
    #[derive(Default)]
    struct Recorder {
        edits: Vec<EditNotification>,
        lengths: Vec<usize>,
    }

    impl EditObserver for Recorder {
        fn on_edit(&mut self, text: &dyn TextSource, edit: EditNotification) {
            self.edits.push(edit);
            self.lengths.push(text.len());
        }
    }

    fn doc(text: &str) -> Document<Recorder> {
        let mut doc = Document::new(Recorder::default());
        doc.set_text(text);
        doc.observer_mut().edits.clear();
        doc.observer_mut().lengths.clear();
        doc
    }

    #[test]
    fn test_edits_notify_once_after_mutation() {
        let mut d = doc("hello");
        d.insert(5, " world").unwrap();
        d.delete(0..1).unwrap();
        d.replace(0..4, "J").unwrap();
        assert_eq!(
            d.observer().edits,
            vec![
                EditNotification::insert(5, 6),
                EditNotification::delete(0, 1),
                EditNotification::replace(0, 1, 4),
            ]
        );
        assert_eq!(d.observer().lengths, vec![11, 10, 7]);
        assert_eq!(d.text().to_string(), "J world");
        assert!(d.is_modified());
    }

    #[test]
    fn test_empty_edit_is_silent() {
        let mut d = doc("abc");
        d.insert(1, "").unwrap();
        assert!(d.observer().edits.is_empty());
        assert!(!d.is_modified());
    }

    #[test]
    fn test_set_text_is_one_edit() {
        let mut d = doc("abc");
        d.set_text("wxyz");
        assert_eq!(d.observer().edits, vec![EditNotification::replace(0, 4, 3)]);
        assert!(!d.is_modified());
        assert!(!d.can_undo());
    }

    #[test]
    fn test_invalid_position() {
        let mut d = doc("abc");
        assert!(matches!(d.insert(4, "x"), Err(EditorError::InvalidPosition { pos: 4, len: 3 })));
        assert!(matches!(d.delete(2..9), Err(EditorError::InvalidPosition { .. })));
        assert!(d.observer().edits.is_empty());
    }

    #[test]
    fn test_read_only() {
        let mut d = doc("abc");
        d.modes_mut().read_only = true;
        assert!(matches!(d.insert(0, "x"), Err(EditorError::ReadOnly)));
        assert!(matches!(d.replace_all("a", "b"), Err(EditorError::ReadOnly)));
        assert_eq!(d.text().to_string(), "abc");
    }

    #[test]
    fn test_single_level_undo() {
        let mut d = doc("one");
        d.insert(3, " two").unwrap();
        d.insert(7, " three").unwrap();
        assert!(d.undo().unwrap());
        assert_eq!(d.text().to_string(), "one two");
        assert!(!d.undo().unwrap());
        assert_eq!(d.text().to_string(), "one two");
        assert_eq!(d.observer().edits.last(), Some(&EditNotification::replace(0, 7, 13)));
    }

    #[test]
    fn test_find_next_case_modes() {
        let mut d = doc("Print x\nprint y");
        assert_eq!(d.find_next(0, "print").unwrap(), Some(0..5));
        assert_eq!(d.find_next(1, "print").unwrap(), Some(8..13));
        d.modes_mut().exact = true;
        assert_eq!(d.find_next(0, "print").unwrap(), Some(8..13));
        assert_eq!(d.find_next(9, "print").unwrap(), None);
        assert!(matches!(d.find_next(0, ""), Err(EditorError::EmptyPattern)));
    }

    #[test]
    fn test_find_is_literal_and_char_indexed() {
        let d = doc("é(a+b) (a+b)");
        assert_eq!(d.find_next(0, "(a+b)").unwrap(), Some(1..6));
        assert_eq!(d.find_next(2, "(a+b)").unwrap(), Some(7..12));
    }

    #[test]
    fn test_replace_next() {
        let mut d = doc("a-a-a");
        assert_eq!(d.replace_next(1, "a", "bb").unwrap(), Some(2..4));
        assert_eq!(d.text().to_string(), "a-bb-a");
        assert_eq!(d.replace_next(5, "x", "y").unwrap(), None);
    }

    #[test]
    fn test_replace_all_counts_and_resumes_after_replacement() {
        let mut d = doc("x = x + 1\nprint x");
        assert_eq!(d.replace_all("x", "xx").unwrap(), 3);
        assert_eq!(d.text().to_string(), "xx = xx + 1\nprint xx");
        assert_eq!(d.observer().edits.len(), 3);
        assert_eq!(d.replace_all("zzz", "y").unwrap(), 0);
    }

    #[test]
    fn test_goto_line_clamps() {
        let d = doc("a\nb\nc");
        assert_eq!(d.goto_line(0), 0);
        assert_eq!(d.goto_line(2), 2);
        assert_eq!(d.goto_line(3), 4);
        assert_eq!(d.goto_line(99), 4);
        assert_eq!(d.line_col(3), (1, 1));
    }

    #[test]
    fn test_bas_extension() {
        assert_eq!(with_bas_extension(Path::new("a/prog")), PathBuf::from("a/prog.bas"));
        assert_eq!(with_bas_extension(Path::new("prog.BAS")), PathBuf::from("prog.BAS"));
        assert_eq!(with_bas_extension(Path::new("prog.txt")), PathBuf::from("prog.txt.bas"));
    }

    #[test]
    fn test_save_load_and_insert_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut d = doc("10 PRINT \"hi\"\n");
        d.insert(0, "' header\n").unwrap();

        let saved = d.save_as(&dir.path().join("prog")).unwrap();
        assert_eq!(saved, dir.path().join("prog.bas"));
        assert!(!d.is_modified());
        assert_eq!(d.name(), "prog.bas");

        let mut other = Document::open(&saved, Recorder::default()).unwrap();
        assert_eq!(other.text().to_string(), "' header\n10 PRINT \"hi\"\n");
        assert!(!other.is_modified());

        other.insert_file(0, &saved).unwrap();
        assert!(other.is_modified());
        assert_eq!(other.text().line_count(), 5);

        let missing = dir.path().join("missing.bas");
        assert!(matches!(other.load_file(&missing), Err(EditorError::FileNotFound(_))));
    }

    #[test]
    fn test_save_without_name() {
        let mut d = doc("x");
        assert!(matches!(d.save(), Err(EditorError::Message(_))));
    }

    #[test]
    fn test_highlighted_document_tracks_edits() {
        let mut d: HighlightedDocument<Damage> = Document::new(IncrementalUpdater::with_sink(Damage::new()));
        d.set_text("10 PRINT x\n20 GOTO 10\n");
        d.replace_all("GOTO", "gosub").unwrap();
        d.insert(0, "' start\n").unwrap();
        d.undo().unwrap();

        assert_eq!(d.styles().len(), d.len());
        assert_eq!(d.styles().tags(), classify_str(&d.text().to_string()).as_slice());
        assert_eq!(d.style_at(3), StyleTag::Keyword);
    }
}
