//! Detects questions that need numeric or symbolic computation.
//!
//! Decision order:
//!
//! 1. Simple CS-theory math ("time complexity", "merge sort", "o(n)", …) with
//!    no advanced symbol anywhere → **not** heavy math.
//! 2. Otherwise heavy math if any of: an advanced symbol (`∑ ∫ √ ≤ …`), a
//!    LaTeX command (`\frac`, `\int`, …), a matrix literal or "3x3 matrix",
//!    or a pure-mathematics term ("eigenvalue", "fourier transform", …).
//!
//! One advanced symbol is enough to override the simple-math allowance.

use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Static tables
// ---------------------------------------------------------------------------

static ADVANCED_SYMBOLS: &[char] = &[
    '∑', '∏', '∫', '∂', '√', '∞', '≈', '≠', '≤', '≥', '±', '×', '÷',
];

static LATEX_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(?:frac|sqrt|sum|int|partial|lim|prod)").expect("static latex pattern")
});

static MATRIX_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\s*\[.*\].*\[.*\]\s*\]|\d+\s*[x×]\s*\d+\s*matrix")
        .expect("static matrix pattern")
});

static PURE_MATH_TERMS: &[&str] = &[
    "determinant",
    "eigenvalue",
    "eigenvector",
    "derivative",
    "integral",
    "differential equation",
    "partial derivative",
    "gradient vector",
    "laplace transform",
    "fourier transform",
    "inverse matrix",
    "transpose matrix",
    "matrix multiplication",
    "row echelon",
    "linear algebra",
    "calculus problem",
    "trigonometric",
    "logarithmic",
    "exponential equation",
    "probability distribution function",
    "variance calculation",
    "standard deviation calculation",
    "k-map minimization",
    "karnaugh map",
    "boolean minimization",
    "truth table minimization",
];

static SIMPLE_CS_MATH_TERMS: &[&str] = &[
    "time complexity",
    "space complexity",
    "o(n)",
    "o(log n)",
    "o(n^2)",
    "o(1)",
    "big o",
    "theta",
    "omega",
    "array",
    "sorting",
    "searching",
    "merge sort",
    "quick sort",
    "binary search",
    "recursion",
    "iteration",
    "graph traversal",
    "tree traversal",
];

// ---------------------------------------------------------------------------
// MathDetector
// ---------------------------------------------------------------------------

/// Heavy-math detector with a simple-CS-math allow-list.
///
/// ```rust
/// use cs_helper::detect::MathDetector;
///
/// let d = MathDetector::new();
/// assert!(!d.detect("Explain the time complexity of merge sort"));
/// assert!(d.detect("Explain the time complexity ∑ of merge sort"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MathDetector;

impl MathDetector {
    /// Create a detector. Stateless; the symbol tables are static.
    pub fn new() -> Self {
        Self
    }

    /// `true` when answering `text` needs symbolic mathematics.
    pub fn detect(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let lower = text.to_lowercase();
        let has_advanced_symbol = text.contains(ADVANCED_SYMBOLS);

        let has_simple_math = SIMPLE_CS_MATH_TERMS.iter().any(|t| lower.contains(t));
        if has_simple_math && !has_advanced_symbol {
            return false;
        }

        has_advanced_symbol
            || LATEX_COMMAND.is_match(text)
            || MATRIX_LITERAL.is_match(text)
            || PURE_MATH_TERMS.iter().any(|t| lower.contains(t))
    }
}

/// `true` when `text` needs computation beyond simple CS-theory math.
pub fn looks_like_heavy_math(text: &str) -> bool {
    MathDetector::new().detect(text)
}
