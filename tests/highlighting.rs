use basic_highlight::syntax::{classify_str, Damage, IncrementalUpdater, StyleTag};
use basic_highlight::{Document, HighlightedDocument};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "PRINT", "print", "Locate", "LEFT$", "CLS", "rem", "REM ", "remark", " ", " ", "\n", "\n", "\"", "\\\"",
    "'", "#", "#1", "x", "a.b", "=", "(", ")", "{", "}", ",", "10", "é", "\t",
];

fn arb_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.concat())
}

/// (position seed, delete count, inserted text)
fn arb_edits() -> impl Strategy<Value = Vec<(usize, usize, String)>> {
    prop::collection::vec((any::<usize>(), 0usize..6, arb_source()), 1..8)
}

fn highlighted(text: &str) -> HighlightedDocument<Damage> {
    let mut doc = Document::new(IncrementalUpdater::with_sink(Damage::new()));
    doc.set_text(text);
    doc
}

fn assert_in_sync(doc: &HighlightedDocument<Damage>) {
    assert_eq!(doc.styles().len(), doc.len());
    let full = classify_str(&doc.text().to_string());
    assert_eq!(doc.styles().tags(), full.as_slice());
}

proptest! {
    /// Incremental updates agree with classifying from scratch, and lengths match after every edit.
    #[test]
    fn prop_incremental_matches_full(source in arb_source(), edits in arb_edits()) {
        let mut doc = highlighted(&source);
        for (seed, delete, insert) in edits {
            let len = doc.len();
            let pos = seed % (len + 1);
            let end = (pos + delete).min(len);
            doc.replace(pos..end, &insert).unwrap();

            let full = classify_str(&doc.text().to_string());
            prop_assert_eq!(doc.styles().len(), doc.len());
            prop_assert_eq!(doc.styles().tags(), full.as_slice());
        }
    }

    /// Undo restores both the text and a consistent style buffer.
    #[test]
    fn prop_undo_keeps_styles_in_sync(source in arb_source(), insert in arb_source(), seed in any::<usize>()) {
        let mut doc = highlighted(&source);
        let pos = seed % (doc.len() + 1);
        doc.insert(pos, &insert).unwrap();
        doc.undo().unwrap();

        let full = classify_str(&doc.text().to_string());
        prop_assert_eq!(doc.text().to_string(), source);
        prop_assert_eq!(doc.styles().tags(), full.as_slice());
    }

    /// Classifying the same text twice gives the same tags.
    #[test]
    fn prop_classify_idempotent(source in arb_source()) {
        prop_assert_eq!(classify_str(&source), classify_str(&source));
    }

    /// One tag per character, whatever the input.
    #[test]
    fn prop_one_tag_per_char(source in any::<String>()) {
        prop_assert_eq!(classify_str(&source).len(), source.chars().count());
    }

    /// Text after a newline never changes the tags before it.
    #[test]
    fn prop_line_independence(head in arb_source(), tail in arb_source()) {
        let before = classify_str(&head);
        let combined = classify_str(&format!("{head}\n{tail}"));
        prop_assert_eq!(&combined[..before.len()], before.as_slice());
    }
}

#[test]
fn scenario_comment_line() {
    assert_eq!(classify_str("' hello\n"), vec![StyleTag::Comment; 8]);
}

#[test]
fn scenario_print_string() {
    use StyleTag::*;
    let tags = classify_str("PRINT \"hi\"");
    assert_eq!(&tags[..5], &[Keyword; 5]);
    assert_eq!(tags[5], Plain);
    assert_eq!(&tags[6..], &[StringLiteral; 4]);
}

#[test]
fn scenario_hash_comment_to_end_of_input() {
    let text = "A = 5 # comment-looking-but-not";
    let tags = classify_str(text);
    let hash = text.find('#').unwrap();
    assert!(tags[hash..].iter().all(|t| *t == StyleTag::Comment));
    assert!(tags[..hash].iter().all(|t| *t == StyleTag::Plain));
}

#[test]
fn scenario_escaped_quotes() {
    let text = r#""he said \"hi\"""#;
    assert!(classify_str(text).iter().all(|t| *t == StyleTag::StringLiteral));
}

#[test]
fn scenario_edit_contained_to_its_line() {
    let source: String = (1..=100)
        .map(|n| format!("{} IF x = {} THEN PRINT \"n\" ' line {}\n", n * 10, n, n))
        .collect();
    let mut doc = highlighted(&source);
    doc.observer_mut().sink_mut().take();

    let line4 = doc.goto_line(4);
    let tail_before = doc.styles().range(line4..doc.len()).to_vec();

    let pos = doc.goto_line(3) + 3;
    doc.insert(pos, "y").unwrap();

    let shifted = line4 + 1;
    assert_eq!(doc.styles().range(shifted..doc.len()), tail_before.as_slice());

    // only line 3 (with its newline) was repainted
    let damage = doc.observer_mut().sink_mut().take();
    assert_eq!(damage, vec![doc.goto_line(3)..shifted]);
    assert_in_sync(&doc);
}

#[test]
fn replace_all_keeps_styles_in_sync() {
    let mut doc = highlighted("10 GOTO 20\n20 goto 10\n");
    assert_eq!(doc.replace_all("goto", "GOSUB").unwrap(), 2);
    assert_eq!(doc.text().to_string(), "10 GOSUB 20\n20 GOSUB 10\n");
    assert_in_sync(&doc);
    assert_eq!(doc.style_at(3), StyleTag::Keyword);
}

#[test]
fn opening_a_string_cascades_to_end() {
    let mut doc = highlighted("a = 1\nb = 2\nc = 3\n");
    doc.observer_mut().sink_mut().take();
    doc.insert(4, "\"").unwrap();
    let damage = doc.observer().sink().bounds().unwrap();
    assert_eq!(damage, 0..doc.len());
    assert_in_sync(&doc);
}
