//! Strict keyword matching over normalized text.
//!
//! Rules, in order:
//!
//! * The keyword is normalized exactly like body text and split into words.
//! * **Single word**: generic words never match.  Words of three characters
//!   or fewer need an exact standalone match; longer words also accept a
//!   trailing `s`.
//! * **Multi-word**: every *significant* word (see
//!   [`is_significant`](crate::text::lexicon::is_significant)) must occur as
//!   a standalone word, and then either the whole phrase occurs contiguously
//!   or the words occur in order with at most [`MAX_GAP_WORDS`] words between
//!   each consecutive pair.
//!
//! Matching is case-insensitive and keyword text is always escaped before it
//! is embedded in a pattern.
//!
//! [`KeywordPattern`] compiles a keyword once; the free functions
//! [`matches`], [`count_occurrences`] and [`is_strong`] are one-shot helpers.

use regex::Regex;

use crate::text::lexicon::{is_generic, is_known_acronym, is_significant};
use crate::text::normalize;

/// Maximum number of intervening words between consecutive keyword words.
pub const MAX_GAP_WORDS: usize = 3;

// ---------------------------------------------------------------------------
// Pattern construction helpers
// ---------------------------------------------------------------------------

fn word_regex(word: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
}

fn plural_word_regex(word: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}s?\b", regex::escape(word)))
}

fn phrase_regex(words: &[String]) -> Result<Regex, regex::Error> {
    let body = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"(?i)\b{body}\b"))
}

fn proximity_regex(words: &[String]) -> Result<Regex, regex::Error> {
    let mut pattern = format!(r"(?i)\b{}\b", regex::escape(&words[0]));
    for word in &words[1..] {
        pattern.push_str(&format!(
            r"(?:\s+\w+){{0,{MAX_GAP_WORDS}}}\s+\b{}\b",
            regex::escape(word)
        ));
    }
    Regex::new(&pattern)
}

fn normalized_words(keyword: &str) -> Vec<String> {
    normalize(keyword)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// KeywordPattern
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Rule {
    /// Empty, generic, or lacking any significant word.
    Never,
    Single(Regex),
    Multi {
        required: Vec<Regex>,
        phrase: Regex,
        proximity: Regex,
    },
}

/// A keyword compiled into its matching and counting patterns.
///
/// ```rust
/// use cs_helper::classify::KeywordPattern;
///
/// let p = KeywordPattern::new("binary search tree").unwrap();
/// assert!(p.is_match("insert into a binary search tree"));
/// assert!(p.is_match("a binary tree used for search tree lookups"));
/// assert!(!p.is_match("binary numbers and search engines"));
/// ```
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    rule: Rule,
    /// One standalone-word pattern per significant word.
    counters: Vec<Regex>,
    strong: bool,
}

impl KeywordPattern {
    /// Compile the matching rule for `keyword`.
    ///
    /// Fails only if a generated pattern is rejected by the regex engine.
    pub fn new(keyword: &str) -> Result<Self, regex::Error> {
        let words = normalized_words(keyword);

        let counters = words
            .iter()
            .filter(|w| is_significant(w))
            .map(|w| word_regex(w))
            .collect::<Result<Vec<_>, _>>()?;

        let rule = match words.as_slice() {
            [] => Rule::Never,
            [word] if is_generic(word) => Rule::Never,
            [word] if word.len() <= 3 => Rule::Single(word_regex(word)?),
            [word] => Rule::Single(plural_word_regex(word)?),
            _ if counters.is_empty() => Rule::Never,
            _ => Rule::Multi {
                required: counters.clone(),
                phrase: phrase_regex(&words)?,
                proximity: proximity_regex(&words)?,
            },
        };

        Ok(Self {
            keyword: keyword.to_owned(),
            rule,
            counters,
            strong: strength_of(&words),
        })
    }

    /// The keyword as declared.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Whether the keyword is allowed to contribute evidence at all.
    pub fn is_strong(&self) -> bool {
        self.strong
    }

    /// Does the keyword occur in already-normalized `text`?
    pub fn is_match(&self, text: &str) -> bool {
        match &self.rule {
            Rule::Never => false,
            Rule::Single(re) => re.is_match(text),
            Rule::Multi {
                required,
                phrase,
                proximity,
            } => {
                if !required.iter().all(|re| re.is_match(text)) {
                    return false;
                }
                phrase.is_match(text) || proximity.is_match(text)
            }
        }
    }

    /// Sum of standalone occurrences of each significant word.
    pub fn count_occurrences(&self, text: &str) -> usize {
        self.counters
            .iter()
            .map(|re| re.find_iter(text).count())
            .sum()
    }
}

fn strength_of(words: &[String]) -> bool {
    match words {
        [] => false,
        [word] => {
            if is_generic(word) {
                false
            } else if word.len() == 2 {
                is_known_acronym(word)
            } else {
                true
            }
        }
        _ => words.iter().any(|w| is_significant(w)),
    }
}

// ---------------------------------------------------------------------------
// One-shot helpers
// ---------------------------------------------------------------------------

/// Does `keyword` match `text` under the strict rules above?
pub fn matches(text: &str, keyword: &str) -> bool {
    KeywordPattern::new(keyword)
        .map(|p| p.is_match(text))
        .unwrap_or(false)
}

/// Corroborating occurrence count for `keyword` in `text`.
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    KeywordPattern::new(keyword)
        .map(|p| p.count_occurrences(text))
        .unwrap_or(0)
}

/// Whether `keyword` is strong enough to count as subject evidence.
pub fn is_strong(keyword: &str) -> bool {
    strength_of(&normalized_words(keyword))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive() {
        assert!(matches("Binary Search Tree problem", "binary search tree"));
        assert!(matches("what is a DEADLOCK", "Deadlock"));
    }

    #[test]
    fn generic_single_words_never_match() {
        assert!(!matches("system system system", "system"));
        assert!(!matches("explain the data model", "data"));
        assert!(!matches("model", "Model"));
    }

    #[test]
    fn empty_keyword_never_matches() {
        assert!(!matches("anything at all", ""));
        assert!(!matches("anything at all", "  ?! "));
    }

    #[test]
    fn short_words_need_exact_standalone_match() {
        assert!(matches("explain the os kernel", "os"));
        assert!(!matches("what is the cost", "os"));
        assert!(!matches("list all oss", "os"));
        assert!(matches("compare tcp and udp", "tcp"));
        assert!(!matches("compare tcps", "tcp"));
    }

    #[test]
    fn long_words_accept_simple_plural() {
        assert!(matches("explain semaphores", "semaphore"));
        assert!(matches("explain a semaphore", "semaphore"));
        assert!(!matches("explain semaphoresque", "semaphore"));
        assert!(!matches("explain semaphored", "semaphore"));
    }

    #[test]
    fn special_characters_are_literal() {
        // "c++" normalizes to "c"; the plus signs never reach the regex engine.
        assert!(matches("write a c program", "c++"));
        assert!(!matches("write a cpp program", "c++"));
        assert!(matches("what is o n log n", "O(n log n)"));
    }

    #[test]
    fn contiguous_phrase_matches() {
        assert!(matches("explain page replacement policies", "page replacement"));
    }

    #[test]
    fn proximity_window_boundaries() {
        // three intervening words are tolerated
        assert!(matches(
            "binary balanced very nested search tree",
            "binary search tree"
        ));
        // four are not
        assert!(!matches(
            "binary balanced very deeply nested search tree",
            "binary search tree"
        ));
    }

    #[test]
    fn proximity_requires_original_order() {
        assert!(!matches("tree search binary", "binary search tree"));
    }

    #[test]
    fn multi_word_is_all_or_nothing() {
        let text = "binary binary binary search search search";
        assert!(!matches(text, "binary search tree"));
    }

    #[test]
    fn multi_word_without_significant_words_is_rejected() {
        // "the", "data" and "os" are all filtered out
        assert!(!matches("the data os", "the data os"));
    }

    #[test]
    fn generic_word_tolerated_inside_phrase() {
        assert!(matches(
            "describe an operating system",
            "operating system"
        ));
        assert!(!matches("describe an operating theatre", "operating system"));
    }

    #[test]
    fn counts_significant_words_only() {
        let text = "a stack is a stack of plates the stack";
        assert_eq!(count_occurrences(text, "stack"), 3);
        assert_eq!(count_occurrences("the process and the process", "process"), 0);
        assert_eq!(
            count_occurrences("binary tree binary search", "binary search tree"),
            4
        );
        assert_eq!(count_occurrences("os os os", "os"), 0);
    }

    #[test]
    fn counting_uses_exact_words() {
        assert_eq!(count_occurrences("semaphores and a semaphore", "semaphore"), 1);
    }

    #[test]
    fn strength_rules() {
        assert!(is_strong("deadlock"));
        assert!(is_strong("os"));
        assert!(is_strong("ai"));
        assert!(!is_strong("xy"));
        assert!(!is_strong("system"));
        assert!(is_strong("tcp"));
        assert!(is_strong("operating system"));
        assert!(!is_strong("the system"));
        assert!(!is_strong(""));
    }

    #[test]
    fn compiled_pattern_reports_keyword_and_strength() {
        let p = KeywordPattern::new("Round Robin").expect("compile");
        assert_eq!(p.keyword(), "Round Robin");
        assert!(p.is_strong());
        assert!(p.is_match("explain round robin scheduling"));
    }
}
