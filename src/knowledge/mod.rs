//! Subject knowledge base loading and validation.

pub mod base;

pub use base::{KnowledgeBase, KnowledgeError, SubjectEntry, SynonymGroup};
