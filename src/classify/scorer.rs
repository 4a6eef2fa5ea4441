//! Subject scoring and ranking.
//!
//! [`SubjectClassifier`] compiles every keyword and synonym of a
//! [`KnowledgeBase`] once, then for each call:
//!
//! 1. normalizes the text and rejects it when too short or not shaped like a
//!    question;
//! 2. accumulates [`MatchEvidence`] per subject from strong keyword matches
//!    and from synonym matches (credited to the canonical keyword);
//! 3. accepts subjects that pass the configured thresholds and ranks them.
//!
//! Rejections are ordinary [`ClassificationResult`] values, never errors.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::matcher::KeywordPattern;
use crate::config::ClassifierConfig;
use crate::knowledge::{KnowledgeBase, KnowledgeError, SubjectEntry};
use crate::text::{looks_like_question, normalize};

/// Sentinel subject returned on every rejection.
pub const NO_SUBJECT: &str = "No subject detected";

/// How much of the cleaned text is echoed back in diagnostics.
const DIAGNOSTIC_TEXT_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Confidence attached to a subject.
///
/// Ordered `None < Low < Medium < High`.  `Low` is part of the ranking scale
/// but the current scoring rule never assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Upper-case wire label (`HIGH`, `MEDIUM`, …).
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::None => "NONE",
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RejectionReason
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    #[serde(rename = "Insufficient text")]
    InsufficientText,
    #[serde(rename = "Text is not a question")]
    NotAQuestion,
    #[serde(rename = "No strong CS keywords found")]
    NoStrongKeywords,
}

impl RejectionReason {
    /// Exact rejection message carried in `reason`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::InsufficientText => "Insufficient text",
            RejectionReason::NotAQuestion => "Text is not a question",
            RejectionReason::NoStrongKeywords => "No strong CS keywords found",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Evidence and scores
// ---------------------------------------------------------------------------

/// Per-subject evidence accumulated during one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchEvidence {
    /// Distinct canonical keywords, in first-match order.
    pub matched: Vec<String>,
    pub total_occurrences: usize,
    pub phrase_count: usize,
    pub multi_word_matches: usize,
}

impl MatchEvidence {
    fn record(&mut self, canonical: &str, occurrences: usize, canonical_words: usize) {
        if !self.matched.iter().any(|k| k == canonical) {
            self.matched.push(canonical.to_owned());
        }
        self.total_occurrences += occurrences;
        if canonical_words >= 2 {
            self.phrase_count += 1;
            self.multi_word_matches += 1;
        }
    }

    /// Number of distinct keywords credited.
    pub fn distinct(&self) -> usize {
        self.matched.len()
    }

    /// No keyword matched at all.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// An accepted subject with the evidence used to rank it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectScore {
    pub subject: String,
    pub confidence: Confidence,
    pub matched_keywords: Vec<String>,
    pub occurrences: usize,
    pub multi_word_matches: usize,
}

/// A subject that matched something but failed acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialMatch {
    pub subject: String,
    pub matched: Vec<String>,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub cleaned_text: String,
    pub partial_matches: Vec<PartialMatch>,
}

/// Order best-first: multi-word matches, then occurrences, then confidence,
/// then distinct keyword count, all descending.  Stable, so full ties keep
/// their incoming order.
pub fn rank_scores(scores: &mut [SubjectScore]) {
    scores.sort_by(compare_scores);
}

fn compare_scores(a: &SubjectScore, b: &SubjectScore) -> Ordering {
    b.multi_word_matches
        .cmp(&a.multi_word_matches)
        .then_with(|| b.occurrences.cmp(&a.occurrences))
        .then_with(|| b.confidence.cmp(&a.confidence))
        .then_with(|| b.matched_keywords.len().cmp(&a.matched_keywords.len()))
}

// ---------------------------------------------------------------------------
// ClassificationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Best-first subjects, or `[NO_SUBJECT]`.
    pub subjects: Vec<String>,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_subject: Option<String>,
    pub matched_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_matches: Vec<SubjectScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl ClassificationResult {
    fn rejected(reason: RejectionReason) -> Self {
        Self {
            subjects: vec![NO_SUBJECT.to_owned()],
            confidence: Confidence::None,
            primary_subject: None,
            matched_keywords: Vec::new(),
            reason: Some(reason),
            all_matches: Vec::new(),
            diagnostics: None,
        }
    }

    fn accepted(scores: Vec<SubjectScore>) -> Self {
        let primary = &scores[0];
        Self {
            subjects: scores.iter().map(|s| s.subject.clone()).collect(),
            confidence: primary.confidence,
            primary_subject: Some(primary.subject.clone()),
            matched_keywords: primary.matched_keywords.clone(),
            reason: None,
            all_matches: scores,
            diagnostics: None,
        }
    }

    /// `true` when no subject was accepted.
    pub fn is_rejected(&self) -> bool {
        self.confidence == Confidence::None
    }
}

// ---------------------------------------------------------------------------
// Compiled knowledge base
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct CompiledKeyword {
    pattern: KeywordPattern,
    /// Whitespace-separated words of the keyword as declared.
    words: usize,
}

#[derive(Debug)]
struct CompiledSynonyms {
    canonical: String,
    canonical_words: usize,
    alternates: Vec<KeywordPattern>,
}

#[derive(Debug)]
struct CompiledSubject {
    name: String,
    keywords: Vec<CompiledKeyword>,
    synonyms: Vec<CompiledSynonyms>,
}

fn compile_pattern(subject: &str, keyword: &str) -> Result<KeywordPattern, KnowledgeError> {
    KeywordPattern::new(keyword).map_err(|source| KnowledgeError::Pattern {
        subject: subject.to_owned(),
        keyword: keyword.to_owned(),
        source,
    })
}

impl CompiledSubject {
    fn compile(entry: &SubjectEntry) -> Result<Self, KnowledgeError> {
        let keywords = entry
            .keywords
            .iter()
            .map(|kw| {
                Ok(CompiledKeyword {
                    pattern: compile_pattern(&entry.name, kw)?,
                    words: kw.split_whitespace().count(),
                })
            })
            .collect::<Result<Vec<_>, KnowledgeError>>()?;

        let synonyms = entry
            .synonyms
            .iter()
            .map(|group| {
                let alternates = group
                    .alternates
                    .iter()
                    .map(|alt| compile_pattern(&entry.name, alt))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledSynonyms {
                    canonical: group.canonical.clone(),
                    canonical_words: group.canonical.split_whitespace().count(),
                    alternates,
                })
            })
            .collect::<Result<Vec<_>, KnowledgeError>>()?;

        Ok(Self {
            name: entry.name.clone(),
            keywords,
            synonyms,
        })
    }

    fn gather(&self, clean: &str) -> MatchEvidence {
        let mut evidence = MatchEvidence::default();

        for kw in &self.keywords {
            if kw.pattern.is_match(clean) && kw.pattern.is_strong() {
                evidence.record(
                    kw.pattern.keyword(),
                    kw.pattern.count_occurrences(clean),
                    kw.words,
                );
            }
        }

        for group in &self.synonyms {
            for alt in &group.alternates {
                if alt.is_match(clean) {
                    evidence.record(
                        &group.canonical,
                        alt.count_occurrences(clean),
                        group.canonical_words,
                    );
                }
            }
        }

        evidence
    }
}

// ---------------------------------------------------------------------------
// SubjectClassifier
// ---------------------------------------------------------------------------

/// Rule-based CS subject classifier.
///
/// Immutable after construction and safe to share across threads.
///
/// ```rust
/// use cs_helper::classify::{Confidence, SubjectClassifier};
/// use cs_helper::knowledge::{KnowledgeBase, SubjectEntry};
///
/// let kb = KnowledgeBase::from_entries(vec![
///     SubjectEntry::new("Operating Systems").with_keywords(["deadlock"]),
/// ])
/// .unwrap();
/// let classifier = SubjectClassifier::with_defaults(&kb).unwrap();
///
/// let result = classifier.classify("What is a deadlock? Explain with an example.");
/// assert_eq!(result.primary_subject.as_deref(), Some("Operating Systems"));
/// assert_eq!(result.confidence, Confidence::Medium);
/// ```
#[derive(Debug)]
pub struct SubjectClassifier {
    subjects: Vec<CompiledSubject>,
    config: ClassifierConfig,
}

impl SubjectClassifier {
    /// Compile every keyword and synonym pattern in `kb` once.
    pub fn new(kb: &KnowledgeBase, config: ClassifierConfig) -> Result<Self, KnowledgeError> {
        let subjects = kb
            .subjects()
            .iter()
            .map(CompiledSubject::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { subjects, config })
    }

    /// [`SubjectClassifier::new`] with [`ClassifierConfig::default`].
    pub fn with_defaults(kb: &KnowledgeBase) -> Result<Self, KnowledgeError> {
        Self::new(kb, ClassifierConfig::default())
    }

    /// Thresholds this classifier was built with.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Ranked subject names only, or `[NO_SUBJECT]`.
    pub fn subjects(&self, text: &str) -> Vec<String> {
        self.classify(text).subjects
    }

    fn is_accepted(&self, evidence: &MatchEvidence) -> bool {
        let distinct = evidence.distinct();
        distinct >= 1
            && (distinct >= self.config.min_distinct_keywords
                || evidence.total_occurrences >= self.config.min_total_occurrences)
    }

    /// Classify raw `text` into ranked subjects, or a rejection with a reason.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let clean = normalize(text);

        if clean.chars().count() < self.config.min_text_chars {
            log::debug!("Rejected: {} normalized chars", clean.chars().count());
            return ClassificationResult::rejected(RejectionReason::InsufficientText);
        }

        if !looks_like_question(&clean) {
            log::debug!("Rejected: no question cue");
            return ClassificationResult::rejected(RejectionReason::NotAQuestion);
        }

        let evidence: Vec<MatchEvidence> =
            self.subjects.iter().map(|s| s.gather(&clean)).collect();

        let mut accepted = Vec::new();
        for (subject, ev) in self.subjects.iter().zip(&evidence) {
            if !self.is_accepted(ev) {
                continue;
            }
            log::debug!(
                "{}: matched {:?} occurrences={} multi_word={}",
                subject.name,
                ev.matched,
                ev.total_occurrences,
                ev.multi_word_matches
            );
            accepted.push(SubjectScore {
                subject: subject.name.clone(),
                confidence: if ev.phrase_count > 0 {
                    Confidence::High
                } else {
                    Confidence::Medium
                },
                matched_keywords: ev.matched.clone(),
                occurrences: ev.total_occurrences,
                multi_word_matches: ev.multi_word_matches,
            });
        }

        if accepted.is_empty() {
            let mut result = ClassificationResult::rejected(RejectionReason::NoStrongKeywords);
            if self.config.diagnostics {
                result.diagnostics = Some(self.diagnostics(&clean, &evidence));
            }
            log::debug!("Rejected: no subject accepted");
            return result;
        }

        rank_scores(&mut accepted);
        ClassificationResult::accepted(accepted)
    }

    fn diagnostics(&self, clean: &str, evidence: &[MatchEvidence]) -> Diagnostics {
        let partial_matches = self
            .subjects
            .iter()
            .zip(evidence)
            .filter(|(_, ev)| !ev.is_empty())
            .map(|(subject, ev)| PartialMatch {
                subject: subject.name.clone(),
                matched: ev.matched.clone(),
                occurrences: ev.total_occurrences,
            })
            .collect();

        Diagnostics {
            cleaned_text: clean.chars().take(DIAGNOSTIC_TEXT_CHARS).collect(),
            partial_matches,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
