//! Admission outcomes: an admitted question or the reason it was turned away.
//!
//! [`Rejection`] is modelled as an error so callers can use
//! `Result<AdmittedQuestion, Rejection>` and `?`, but every variant is an
//! ordinary outcome of judging user input, not a fault.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::{Confidence, RejectionReason};

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a question was not admitted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Rejection {
    /// Nothing but whitespace was extracted.
    #[error("no text could be extracted")]
    NoText,

    /// Fewer long words than the configured minimum.
    #[error("only {word_count} words detected (minimum {minimum} required)")]
    InsufficientText { word_count: usize, minimum: usize },

    /// The answer would have to be drawn.
    #[error("diagram-based question detected")]
    DiagramDetected,

    /// The classifier found no accepted CS subject.
    #[error("not a computer science question: {reason}")]
    NotCsDomain { reason: RejectionReason },

    /// The answer needs symbolic mathematics.
    #[error("mathematical or numerical content detected")]
    ComplexMath,
}

impl Rejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::NoText => "NO_TEXT",
            Rejection::InsufficientText { .. } => "INSUFFICIENT_TEXT",
            Rejection::DiagramDetected => "DIAGRAM_DETECTED",
            Rejection::NotCsDomain { .. } => "NOT_CS_DOMAIN",
            Rejection::ComplexMath => "COMPLEX_MATH",
        }
    }

    /// Short hint on what the user can do instead.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Rejection::NoText => "Make sure the image contains clear, readable text",
            Rejection::InsufficientText { .. } => {
                "Upload a clearer image with more readable text"
            }
            Rejection::DiagramDetected => "Try a text-based conceptual question instead",
            Rejection::NotCsDomain { .. } => {
                "Upload a question from one of the supported CS subjects"
            }
            Rejection::ComplexMath => "Try a programming or theory question instead",
        }
    }

    /// Content that is valid but not supported yet, as opposed to unusable input.
    pub fn is_future_feature(&self) -> bool {
        matches!(self, Rejection::DiagramDetected | Rejection::ComplexMath)
    }
}

// ---------------------------------------------------------------------------
// AdmittedQuestion
// ---------------------------------------------------------------------------

/// A question that passed every gate, tagged with its subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmittedQuestion {
    pub text: String,
    pub subject: String,
    pub confidence: Confidence,
    pub word_count: usize,
    pub matched_keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            Rejection::NoText,
            Rejection::InsufficientText {
                word_count: 1,
                minimum: 5,
            },
            Rejection::DiagramDetected,
            Rejection::NotCsDomain {
                reason: RejectionReason::NotAQuestion,
            },
            Rejection::ComplexMath,
        ];
        let mut codes: Vec<&str> = all.iter().map(Rejection::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn messages_carry_details() {
        let r = Rejection::InsufficientText {
            word_count: 2,
            minimum: 5,
        };
        assert_eq!(r.to_string(), "only 2 words detected (minimum 5 required)");

        let r = Rejection::NotCsDomain {
            reason: RejectionReason::NoStrongKeywords,
        };
        assert_eq!(
            r.to_string(),
            "not a computer science question: No strong CS keywords found"
        );
    }

    #[test]
    fn future_features() {
        assert!(Rejection::DiagramDetected.is_future_feature());
        assert!(Rejection::ComplexMath.is_future_feature());
        assert!(!Rejection::NoText.is_future_feature());
    }
}
