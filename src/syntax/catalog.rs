//! BASIC keyword catalogs
//!
//! Three disjoint word lists, each sorted in ASCII case-insensitive order so
//! lookups can binary search. Lookups check keywords, then functions, then
//! procedures, and stop at the first hit.

use std::cmp::Ordering;

use super::tokens::WordClass;

const KEYWORDS: &[&str] = &[
    "AND", "APPEND", "AS", "BG", "BYREF", "CALL", "CASE", "CHAIN", "CLOSE", "CONST", "DATA",
    "DECLARE", "DEF", "DIM", "DO", "ELIF", "ELSE", "ELSEIF", "END", "ENDIF", "EQV", "ERASE",
    "EXIT", "EXPORT", "FALSE", "FOR", "FUNC", "FUNCTION", "GOSUB", "GOTO", "IF", "IMP", "IMPORT",
    "IN", "INPUT", "LABEL", "LET", "LIKE", "LOCAL", "LOOP", "MOD", "NAND", "NEXT", "NOR", "NOT",
    "ON", "OPEN", "OPTION", "OR", "OUTPUT", "PRINT", "PROC", "RANDOM", "READ", "REDIM", "REPEAT",
    "RESTORE", "RETURN", "SELECT", "SHARED", "STATIC", "STEP", "STOP", "SUB", "THEN", "TO",
    "TRUE", "UNIT", "UNTIL", "USE", "USING", "WEND", "WHILE", "XNOR", "XOR",
];

const FUNCTIONS: &[&str] = &[
    "ABS", "ACOS", "ACOSH", "ASC", "ASIN", "ATAN", "ATAN2", "ATN", "BIN", "CBS", "CDBL", "CEIL",
    "CHR", "CHR$", "CINT", "COS", "COSH", "DATE", "DATE$", "DEG", "EOF", "EXP", "FIX", "FLOOR",
    "FORMAT", "FRAC", "FRE", "FREEFILE", "HEX", "HEX$", "INKEY", "INKEY$", "INSTR", "INT",
    "ISARRAY", "ISNUMBER", "ISSTRING", "LBOUND", "LCASE", "LCASE$", "LEFT", "LEFT$", "LEN", "LOG",
    "LOG10", "LOWER", "LTRIM", "LTRIM$", "MAX", "MID", "MID$", "MIN", "OCT", "OCT$", "POINT",
    "POW", "RAD", "REPLACE", "RGB", "RIGHT", "RIGHT$", "RINSTR", "RND", "ROUND", "RTRIM",
    "RTRIM$", "SGN", "SIN", "SINH", "SPACE", "SPACE$", "SPC", "SQR", "SQRT", "STR", "STR$",
    "STRING", "STRING$", "TAB", "TAN", "TANH", "TICKS", "TIME", "TIME$", "TIMER", "TRIM", "TRIM$",
    "UBOUND", "UCASE", "UCASE$", "UPPER", "VAL",
];

const PROCEDURES: &[&str] = &[
    "ARC", "BEEP", "CHART", "CHDIR", "CIRCLE", "CLS", "COLOR", "COPY", "DELAY", "DELETE", "DRAW",
    "FILES", "INSERT", "KILL", "LINE", "LOCATE", "MKDIR", "NAME", "PAINT", "PAUSE", "PLAY",
    "PSET", "RANDOMIZE", "RECT", "RENAME", "RMDIR", "SEEK", "SHOWPAGE", "SORT", "SOUND", "SPLIT",
    "SWAP", "TROFF", "TRON", "WRITE",
];

/// The built-in SmallBASIC-style catalog
pub static BUILTIN_CATALOG: KeywordCatalog = KeywordCatalog::new(KEYWORDS, FUNCTIONS, PROCEDURES);

/// Compare two words ignoring ASCII case
pub(crate) fn cmp_ignore_case<A, B>(a: A, b: B) -> Ordering
where
    A: IntoIterator<Item = char>,
    B: IntoIterator<Item = char>,
{
    a.into_iter()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.into_iter().map(|c| c.to_ascii_lowercase()))
}

/// One sorted word list
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    words: &'static [&'static str],
}

impl Catalog {
    pub const fn new(words: &'static [&'static str]) -> Self {
        Self { words }
    }

    /// Binary search for a word, ignoring case
    pub fn contains(&self, word: &[char]) -> bool {
        self.words
            .binary_search_by(|probe| cmp_ignore_case(probe.chars(), word.iter().copied()))
            .is_ok()
    }

    pub fn words(&self) -> &'static [&'static str] {
        self.words
    }

    /// Whether the list is in the order `contains` relies on
    pub fn is_sorted(&self) -> bool {
        self.words
            .windows(2)
            .all(|w| cmp_ignore_case(w[0].chars(), w[1].chars()) == Ordering::Less)
    }
}

/// Keyword, function and procedure catalogs checked in priority order
#[derive(Debug, Clone, Copy)]
pub struct KeywordCatalog {
    keywords: Catalog,
    functions: Catalog,
    procedures: Catalog,
}

impl KeywordCatalog {
    /// Build a catalog from pre-sorted word lists
    pub const fn new(
        keywords: &'static [&'static str],
        functions: &'static [&'static str],
        procedures: &'static [&'static str],
    ) -> Self {
        Self {
            keywords: Catalog::new(keywords),
            functions: Catalog::new(functions),
            procedures: Catalog::new(procedures),
        }
    }

    /// Find which catalog a word belongs to
    pub fn classify(&self, word: &[char]) -> Option<WordClass> {
        if word.is_empty() {
            return None;
        }
        if self.keywords.contains(word) {
            Some(WordClass::Keyword)
        } else if self.functions.contains(word) {
            Some(WordClass::Function)
        } else if self.procedures.contains(word) {
            Some(WordClass::Procedure)
        } else {
            None
        }
    }

    /// Convenience wrapper over [`KeywordCatalog::classify`] for string input
    pub fn classify_str(&self, word: &str) -> Option<WordClass> {
        let chars: Vec<char> = word.chars().collect();
        self.classify(&chars)
    }

    pub fn keywords(&self) -> &Catalog {
        &self.keywords
    }

    pub fn functions(&self) -> &Catalog {
        &self.functions
    }

    pub fn procedures(&self) -> &Catalog {
        &self.procedures
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        BUILTIN_CATALOG
    }
}
