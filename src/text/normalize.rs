//! Text cleaning shared by every stage of the classifier.
//!
//! [`normalize`] lower-cases, turns every character that is not an ASCII word
//! character (`[a-z0-9_]`) into a separator, and collapses separators into a
//! single space.  The output therefore only ever contains `[a-z0-9_ ]`, which
//! keeps regex word boundaries unambiguous downstream.

use super::lexicon::QUESTION_HINTS;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Normalize `text` into the cleaned representation used for matching.
///
/// Total, deterministic and idempotent.
///
/// ```rust
/// use cs_helper::text::normalize;
///
/// assert_eq!(normalize("  What is a B-Tree?\n"), "what is a b tree");
/// assert_eq!(normalize(&normalize("O(n log n)")), normalize("O(n log n)"));
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for word in lowered.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Count whitespace-separated tokens of the raw text longer than two
/// characters.  Used by the length gate and the diagram shortcut.
pub fn long_token_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .count()
}

/// `true` when normalized text contains at least one question cue.
pub fn looks_like_question(clean: &str) -> bool {
    QUESTION_HINTS.iter().any(|hint| clean.contains(hint))
}
