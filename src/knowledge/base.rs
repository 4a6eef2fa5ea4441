//! Subject knowledge base: subject name → keywords + synonym groups.
//!
//! The on-disk format is a JSON object keyed by subject name:
//!
//! ```json
//! {
//!   "Operating Systems": {
//!     "keywords": ["deadlock", "page replacement"],
//!     "synonyms": { "deadlock": ["circular wait"] }
//!   }
//! }
//! ```
//!
//! Declaration order is preserved for both subjects and synonym groups; the
//! scorer relies on it as its final tie-break.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::KnowledgeConfig;

static BUILTIN_JSON: &str = include_str!("../../data/cs_keywords.json");

// ---------------------------------------------------------------------------
// KnowledgeError
// ---------------------------------------------------------------------------

/// Fatal knowledge-base load failures.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The knowledge-base file could not be read.
    #[error("failed to read knowledge base {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or has the wrong shape.
    #[error("malformed knowledge base JSON")]
    Parse(#[from] serde_json::Error),

    /// Parsed, but fails validation (empty, duplicate or unnamed subjects).
    #[error("invalid knowledge base: {0}")]
    Invalid(String),

    /// A keyword could not be turned into a matching pattern.
    #[error("keyword {keyword:?} in subject {subject:?} produced an invalid pattern")]
    Pattern {
        subject: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

// ---------------------------------------------------------------------------
// SubjectEntry
// ---------------------------------------------------------------------------

/// Alternate phrasings that count as evidence for one canonical keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub canonical: String,
    pub alternates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub keywords: Vec<String>,
    pub synonyms: Vec<SynonymGroup>,
}

impl SubjectEntry {
    /// Subject with no keywords or synonyms yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: Vec::new(),
            synonyms: Vec::new(),
        }
    }

    /// Append keywords, keeping their order.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Add a synonym group crediting `canonical`.
    pub fn with_synonyms<I, S>(mut self, canonical: impl Into<String>, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms.push(SynonymGroup {
            canonical: canonical.into(),
            alternates: alternates.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// Shape of one subject value in the JSON file.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    synonyms: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// KnowledgeBase
// ---------------------------------------------------------------------------

/// Immutable, validated set of subjects.
///
/// Built once at startup and shared by reference; every query is read-only.
///
/// ```rust
/// use cs_helper::knowledge::{KnowledgeBase, SubjectEntry};
///
/// let kb = KnowledgeBase::from_entries(vec![
///     SubjectEntry::new("Operating Systems").with_keywords(["deadlock"]),
/// ])
/// .unwrap();
/// assert_eq!(kb.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    subjects: Vec<SubjectEntry>,
}

impl KnowledgeBase {
    /// Build from in-memory entries, validating them.
    pub fn from_entries(subjects: Vec<SubjectEntry>) -> Result<Self, KnowledgeError> {
        let kb = Self { subjects };
        kb.validate()?;
        Ok(kb)
    }

    /// Parse the JSON format described in the module docs.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let root: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut subjects = Vec::with_capacity(root.len());
        for (name, value) in root {
            let raw: RawEntry = serde_json::from_value(value)?;
            let mut synonyms = Vec::with_capacity(raw.synonyms.len());
            for (canonical, alternates) in raw.synonyms {
                let alternates: Vec<String> = serde_json::from_value(alternates)?;
                synonyms.push(SynonymGroup {
                    canonical,
                    alternates,
                });
            }
            subjects.push(SubjectEntry {
                name,
                keywords: raw.keywords,
                synonyms,
            });
        }

        Self::from_entries(subjects)
    }

    /// Read and parse a knowledge-base file.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let data = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kb = Self::from_json(&data)?;
        log::info!(
            "Loaded knowledge base {} ({} subjects)",
            path.display(),
            kb.len()
        );
        Ok(kb)
    }

    /// The computer-science knowledge base compiled into the binary.
    pub fn builtin() -> Result<Self, KnowledgeError> {
        Self::from_json(BUILTIN_JSON)
    }

    /// Resolve the configured source: the explicit path, else `fallback_file`
    /// when it exists, else the built-in base.
    pub fn from_config(
        config: &KnowledgeConfig,
        fallback_file: &Path,
    ) -> Result<Self, KnowledgeError> {
        match &config.path {
            Some(path) => Self::load(path),
            None if fallback_file.exists() => Self::load(fallback_file),
            None => {
                let kb = Self::builtin()?;
                log::info!("Using built-in knowledge base ({} subjects)", kb.len());
                Ok(kb)
            }
        }
    }

    fn validate(&self) -> Result<(), KnowledgeError> {
        if self.subjects.is_empty() {
            return Err(KnowledgeError::Invalid("no subjects defined".into()));
        }

        let mut seen = HashSet::new();
        for subject in &self.subjects {
            if subject.name.trim().is_empty() {
                return Err(KnowledgeError::Invalid("empty subject name".into()));
            }
            if !seen.insert(subject.name.as_str()) {
                return Err(KnowledgeError::Invalid(format!(
                    "duplicate subject {:?}",
                    subject.name
                )));
            }
            if subject.keywords.is_empty() && subject.synonyms.is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "subject {:?} has neither keywords nor synonyms",
                    subject.name
                )));
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Subjects in declaration order.
    pub fn subjects(&self) -> &[SubjectEntry] {
        &self.subjects
    }

    /// Look a subject up by exact name.
    pub fn get(&self, name: &str) -> Option<&SubjectEntry> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// `true` when there are no subjects.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "Operating Systems": {
            "keywords": ["deadlock", "page replacement"],
            "synonyms": { "deadlock": ["circular wait"], "scheduling": ["round robin"] }
        },
        "Computer Networks": { "keywords": ["tcp"] },
        "Algorithms": { "synonyms": { "dynamic programming": ["memoization"] } }
    }"#;

    #[test]
    fn parses_and_preserves_declaration_order() {
        let kb = KnowledgeBase::from_json(SAMPLE).expect("parse");
        let names: Vec<&str> = kb.subjects().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Operating Systems", "Computer Networks", "Algorithms"]);

        let os = kb.get("Operating Systems").expect("os");
        assert_eq!(os.keywords, ["deadlock", "page replacement"]);
        assert_eq!(os.synonyms[0].canonical, "deadlock");
        assert_eq!(os.synonyms[1].canonical, "scheduling");
        assert_eq!(os.synonyms[1].alternates, ["round robin"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let kb = KnowledgeBase::from_json(SAMPLE).expect("parse");
        assert!(kb.get("Computer Networks").unwrap().synonyms.is_empty());
        assert!(kb.get("Algorithms").unwrap().keywords.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = KnowledgeBase::from_json("{ not json").unwrap_err();
        assert!(matches!(err, KnowledgeError::Parse(_)));
    }

    #[test]
    fn rejects_wrong_shape() {
        let err = KnowledgeBase::from_json(r#"{ "OS": { "keywords": "deadlock" } }"#).unwrap_err();
        assert!(matches!(err, KnowledgeError::Parse(_)));
    }

    #[test]
    fn rejects_empty_base_and_empty_subjects() {
        assert!(matches!(
            KnowledgeBase::from_json("{}").unwrap_err(),
            KnowledgeError::Invalid(_)
        ));
        assert!(matches!(
            KnowledgeBase::from_json(r#"{ "OS": {} }"#).unwrap_err(),
            KnowledgeError::Invalid(_)
        ));
    }

    #[test]
    fn rejects_duplicate_subjects_from_entries() {
        let err = KnowledgeBase::from_entries(vec![
            SubjectEntry::new("OS").with_keywords(["deadlock"]),
            SubjectEntry::new("OS").with_keywords(["paging"]),
        ])
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::Invalid(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let err = KnowledgeBase::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, KnowledgeError::Io { .. }));
    }

    #[test]
    fn io_cause_is_reported_once_in_error_chain() {
        let dir = tempdir().expect("temp dir");
        let err = KnowledgeBase::load(&dir.path().join("absent.json")).unwrap_err();
        let cause = std::error::Error::source(&err)
            .expect("io source")
            .to_string();
        assert!(!err.to_string().contains(&cause));

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain.matches(cause.as_str()).count(), 1);
        assert!(chain.contains("absent.json"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("kb.json");
        std::fs::write(&path, SAMPLE).expect("write");
        let kb = KnowledgeBase::load(&path).expect("load");
        assert_eq!(kb.len(), 3);
    }

    #[test]
    fn config_path_wins_over_fallback() {
        let dir = tempdir().expect("temp dir");
        let explicit = dir.path().join("explicit.json");
        std::fs::write(&explicit, r#"{ "Only": { "keywords": ["lexer"] } }"#).expect("write");
        let fallback = dir.path().join("fallback.json");
        std::fs::write(&fallback, SAMPLE).expect("write");

        let config = KnowledgeConfig {
            path: Some(explicit),
        };
        let kb = KnowledgeBase::from_config(&config, &fallback).expect("load");
        assert_eq!(kb.len(), 1);

        let kb = KnowledgeBase::from_config(&KnowledgeConfig::default(), &fallback).expect("load");
        assert_eq!(kb.len(), 3);
    }

    #[test]
    fn missing_fallback_uses_builtin() {
        let dir = tempdir().expect("temp dir");
        let kb = KnowledgeBase::from_config(
            &KnowledgeConfig::default(),
            &dir.path().join("absent.json"),
        )
        .expect("builtin");
        assert_eq!(kb.len(), KnowledgeBase::builtin().unwrap().len());
    }

    #[test]
    fn explicit_missing_path_is_fatal() {
        let dir = tempdir().expect("temp dir");
        let config = KnowledgeConfig {
            path: Some(dir.path().join("absent.json")),
        };
        assert!(KnowledgeBase::from_config(&config, &dir.path().join("x.json")).is_err());
    }

    #[test]
    fn builtin_parses() {
        let kb = KnowledgeBase::builtin().expect("builtin");
        assert!(kb.get("Operating Systems").is_some());
        assert!(kb.get("Data Structures").is_some());
        assert!(kb.len() >= 10);
    }
}
