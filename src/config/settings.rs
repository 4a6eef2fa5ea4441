//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Missing keys fall back to their defaults, so a partial `settings.toml`
//! is valid.

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// One admission check.
///
/// | Variant     | Rejects when                                       |
/// |-------------|----------------------------------------------------|
/// | WordCount   | fewer than `min_word_count` tokens longer than 2   |
/// | Diagram     | the question asks for a drawing                    |
/// | Subject     | no CS subject is accepted                          |
/// | HeavyMath   | the question needs real numeric/symbolic work      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    WordCount,
    Diagram,
    Subject,
    HeavyMath,
}

impl Gate {
    /// Human-readable gate name for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Gate::WordCount => "word_count",
            Gate::Diagram => "diagram",
            Gate::Subject => "subject",
            Gate::HeavyMath => "heavy_math",
        }
    }
}

// ---------------------------------------------------------------------------
// ClassifierConfig
// ---------------------------------------------------------------------------

/// Thresholds for the subject classifier.
///
/// `min_distinct_keywords` and `min_total_occurrences` are independent: a
/// subject with at least one match is accepted when it reaches *either*.
/// With the default `min_distinct_keywords = 1` the occurrence threshold
/// never decides anything; raising it brings the occurrence path back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Normalized texts shorter than this are rejected as insufficient.
    pub min_text_chars: usize,
    pub min_distinct_keywords: usize,
    pub min_total_occurrences: usize,
    /// Attach partial-match diagnostics to "no strong keywords" rejections.
    pub diagnostics: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 15,
            min_distinct_keywords: 1,
            min_total_occurrences: 2,
            diagnostics: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AdmissionConfig
// ---------------------------------------------------------------------------

/// Settings for the admission pipeline that wraps the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Minimum number of tokens longer than two characters.
    pub min_word_count: usize,
    /// Gates in evaluation order.  `subject` must appear exactly once.
    pub gates: Vec<Gate>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            min_word_count: 5,
            gates: vec![Gate::WordCount, Gate::Diagram, Gate::Subject, Gate::HeavyMath],
        }
    }
}

impl AdmissionConfig {
    /// Reject duplicate gates and gate lists without [`Gate::Subject`].
    pub fn validate(&self) -> Result<()> {
        for (i, gate) in self.gates.iter().enumerate() {
            if self.gates[..i].contains(gate) {
                bail!("admission gate `{}` listed more than once", gate.label());
            }
        }
        if !self.gates.contains(&Gate::Subject) {
            bail!("admission gates must include `subject`");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// KnowledgeConfig
// ---------------------------------------------------------------------------

/// Where the subject knowledge base comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Explicit knowledge-base JSON file.  When `None`, `cs_keywords.json`
    /// in the config directory is used if present, else the built-in base.
    pub path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use cs_helper::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(config.admission.min_word_count > 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub admission: AdmissionConfig,
    pub knowledge: KnowledgeConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check cross-field constraints not expressible in the TOML schema.
    pub fn validate(&self) -> Result<()> {
        self.admission.validate()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
