//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the classifier,
//! the admission pipeline and the knowledge-base source, `AppPaths` for the
//! platform config directory, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AdmissionConfig, AppConfig, ClassifierConfig, Gate, KnowledgeConfig};
