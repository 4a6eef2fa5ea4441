//! Detects questions whose answer has to be drawn.
//!
//! Two signals, either of which is enough:
//!
//! * **Label-only text**: fewer than [`SHORT_TEXT_WORDS`] tokens longer than
//!   two characters *and* at least one arrow / box-drawing symbol.  OCR of a
//!   diagram tends to produce exactly this.
//! * **Cue phrases**: a drawing verb ("draw", "sketch", …) or a diagram type
//!   ("state diagram", "k-map", "dfa for", …) anywhere in the lower-cased text.

use crate::text::long_token_count;

/// Word-count ceiling under which drawing symbols alone mean "diagram".
pub const SHORT_TEXT_WORDS: usize = 10;

// ---------------------------------------------------------------------------
// Static cue tables
// ---------------------------------------------------------------------------

static DRAWING_SYMBOLS: &[char] = &[
    '→', '←', '↑', '↓', '|', '─', '┼', '┌', '┐', '└', '┘', '▪', '▫', '●', '○', '■', '□',
];

static DIAGRAM_ACTIONS: &[&str] = &[
    "draw",
    "sketch",
    "design",
    "construct",
    "illustrate",
    "show the diagram",
    "create diagram",
    "plot",
    "trace",
    "derive diagram",
];

static DIAGRAM_TYPES: &[&str] = &[
    "state transition diagram",
    "state diagram",
    "circuit diagram",
    "block diagram",
    "flowchart",
    "flow chart",
    "tree diagram",
    "er diagram",
    "entity relationship diagram",
    "dfa for",
    "nfa for",
    "design dfa",
    "design nfa",
    "construct dfa",
    "construct nfa",
    "construct pda",
    "pushdown automaton for",
    "turing machine for",
    "truth table",
    "k-map",
    "k map",
    "karnaugh map",
    "logic circuit",
    "timing diagram",
    "sequence diagram",
    "uml diagram",
    "class diagram",
    "use case diagram",
    "activity diagram",
    "network diagram",
    "topology diagram",
];

// ---------------------------------------------------------------------------
// DiagramDetector
// ---------------------------------------------------------------------------

/// Keyword and symbol-density diagram detector.
///
/// ```rust
/// use cs_helper::detect::DiagramDetector;
///
/// let d = DiagramDetector::new();
/// assert!(d.detect("Draw the state diagram for a vending machine"));
/// assert!(!d.detect("Explain the difference between TCP and UDP"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramDetector;

impl DiagramDetector {
    /// Create a detector. Stateless; the cue tables are static.
    pub fn new() -> Self {
        Self
    }

    /// `true` when `text` is label-only drawing output or names a diagram.
    pub fn detect(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        if long_token_count(text) < SHORT_TEXT_WORDS && text.contains(DRAWING_SYMBOLS) {
            return true;
        }

        let lower = text.to_lowercase();
        DIAGRAM_ACTIONS.iter().any(|cue| lower.contains(cue))
            || DIAGRAM_TYPES.iter().any(|cue| lower.contains(cue))
    }
}

/// `true` when `text` most likely asks for a drawn answer.
pub fn looks_like_diagram(text: &str) -> bool {
    DiagramDetector::new().detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_not_a_diagram() {
        assert!(!looks_like_diagram(""));
        assert!(!looks_like_diagram("   "));
    }

    #[test]
    fn short_label_text_with_arrows_short_circuits() {
        // six tokens, no cue words
        assert!(looks_like_diagram("q0 → q1 ← q2 ┌ start ┘"));
        assert!(looks_like_diagram("A ● B ○ C"));
    }

    #[test]
    fn long_text_with_symbols_needs_a_cue() {
        let text = "Explain why process scheduling order matters | consider \
                    waiting times turnaround times response times fairness";
        assert!(!looks_like_diagram(text));
    }

    #[test]
    fn action_verbs_trigger() {
        assert!(looks_like_diagram("Sketch a neat figure of the memory hierarchy"));
        assert!(looks_like_diagram("CONSTRUCT the parse tree for id+id*id"));
    }

    #[test]
    fn diagram_types_trigger() {
        assert!(looks_like_diagram("Minimise using a K-map: f = sum of minterms"));
        assert!(looks_like_diagram("Give the ER diagram of a library database"));
        assert!(looks_like_diagram("Give a DFA for strings ending in 01"));
    }

    #[test]
    fn conceptual_questions_pass() {
        assert!(!looks_like_diagram("What is a deadlock? Explain with an example."));
        assert!(!looks_like_diagram("Compare paging and segmentation"));
    }

    #[test]
    fn cue_is_a_plain_substring() {
        // "draw" inside "drawbacks" counts
        assert!(looks_like_diagram("List the drawbacks of the waterfall approach"));
    }
}
