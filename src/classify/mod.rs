//! CS subject classification.
//!
//! * [`KeywordPattern`] / [`matches`]: strict keyword matching.
//! * [`SubjectClassifier`]: scores every subject and ranks the accepted ones.
//! * [`ClassificationResult`]: ranked subjects or a rejection with a reason.

pub mod matcher;
pub mod scorer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use matcher::{count_occurrences, is_strong, matches, KeywordPattern, MAX_GAP_WORDS};
pub use scorer::{
    rank_scores, ClassificationResult, Confidence, Diagnostics, MatchEvidence, PartialMatch,
    RejectionReason, SubjectClassifier, SubjectScore, NO_SUBJECT,
};
