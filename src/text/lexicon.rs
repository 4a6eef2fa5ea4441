//! Fixed word lists shared by the matcher, scorer and question-shape check.
//!
//! | List | Role |
//! |------|------|
//! | [`GENERIC_WORDS`] | Too domain-neutral to signal a subject on their own |
//! | [`STOPWORDS`] | Function words ignored when judging keyword significance |
//! | [`QUESTION_HINTS`] | Interrogative / imperative cues; one must be present |
//! | [`KNOWN_ACRONYMS`] | The only two-letter single words accepted as evidence |

use std::collections::HashSet;

use once_cell::sync::Lazy;

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

pub const GENERIC_WORDS: &[&str] = &[
    "system",
    "architecture",
    "process",
    "data",
    "computer",
    "program",
    "software",
    "environment",
    "method",
    "model",
];

pub const STOPWORDS: &[&str] = &[
    "the", "is", "in", "on", "at", "a", "an", "and", "or", "of", "for", "to", "by", "with",
    "from", "as", "it", "this", "that", "be", "but", "not", "what", "how", "why", "when",
    "where", "explain", "describe", "define", "any", "two", "following", "example", "own",
    "words", "aspects", "four",
];

/// Substring cues checked against normalized text.
pub const QUESTION_HINTS: &[&str] = &[
    "what is",
    "explain",
    "define",
    "describe",
    "compare",
    "differentiate",
    "why",
    "how",
    "solve",
    "prove",
    "discuss",
    "write",
    "interpret",
    "draw",
    "show",
    "illustrate",
    "calculate",
    "list",
    "enumerate",
];

pub const KNOWN_ACRONYMS: &[&str] = &["ai", "ml", "os", "db", "ui", "ux", "ip", "vm", "er"];

static GENERIC_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| GENERIC_WORDS.iter().copied().collect());

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// `word` must already be lower-case.
pub fn is_generic(word: &str) -> bool {
    GENERIC_SET.contains(word)
}

/// `word` must already be lower-case.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Two-letter words that still carry subject meaning (`os`, `ai`, …).
pub fn is_known_acronym(word: &str) -> bool {
    KNOWN_ACRONYMS.contains(&word)
}

/// A keyword word that carries evidence: not a stopword, not generic, and
/// longer than two characters.
pub fn is_significant(word: &str) -> bool {
    word.chars().count() > 2 && !is_stopword(word) && !is_generic(word)
}
