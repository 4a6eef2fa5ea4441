//! Text normalization and the fixed word lists used by the classifier.

pub mod lexicon;
pub mod normalize;

pub use normalize::{long_token_count, looks_like_question, normalize};
