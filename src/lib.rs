//! Admission and subject classification for photographed CS questions.
//!
//! Given text extracted from an image, decide whether it is an answerable
//! computer-science question and which subject it belongs to.
//!
//! * [`text`]: normalization and the fixed word lists.
//! * [`knowledge`]: subject → keywords / synonyms knowledge base.
//! * [`classify`]: strict keyword matching, subject scoring and ranking.
//! * [`detect`]: diagram and heavy-math content detectors.
//! * [`pipeline`]: gate ordering into one admit / reject decision.
//! * [`config`]: TOML settings and platform paths.

pub mod classify;
pub mod config;
pub mod detect;
pub mod knowledge;
pub mod pipeline;
pub mod text;
