//! Admission pipeline: runs the configured gates over extracted text.
//!
//! # Default gate order
//!
//! ```text
//! text
//!   ├─ blank?                         → NoText
//!   ├─ word_count  (tokens > 2 chars) → InsufficientText
//!   ├─ diagram     (DiagramDetector)  → DiagramDetected
//!   ├─ subject     (SubjectClassifier)→ NotCsDomain
//!   └─ heavy_math  (MathDetector)     → ComplexMath
//!         └─▶ AdmittedQuestion
//! ```
//!
//! The order comes from [`AdmissionConfig::gates`]; the first failing gate
//! decides.  Classification always runs, even if `subject` was left out of
//! the gate list, because the admitted question has to carry a subject.

use crate::classify::{ClassificationResult, RejectionReason, SubjectClassifier};
use crate::config::{AdmissionConfig, AppConfig, Gate};
use crate::detect::{DiagramDetector, MathDetector};
use crate::knowledge::{KnowledgeBase, KnowledgeError};
use crate::text::long_token_count;

use super::outcome::{AdmittedQuestion, Rejection};

// ---------------------------------------------------------------------------
// AdmissionPipeline
// ---------------------------------------------------------------------------

/// Decides whether extracted text is an answerable CS question.
///
/// Immutable after construction; share it by reference or `Arc` across
/// request handlers.
///
/// ```rust
/// use cs_helper::config::AppConfig;
/// use cs_helper::knowledge::{KnowledgeBase, SubjectEntry};
/// use cs_helper::pipeline::{AdmissionPipeline, Rejection};
///
/// let kb = KnowledgeBase::from_entries(vec![
///     SubjectEntry::new("Operating Systems").with_keywords(["deadlock"]),
/// ])
/// .unwrap();
/// let pipeline = AdmissionPipeline::from_config(&kb, &AppConfig::default()).unwrap();
///
/// let admitted = pipeline
///     .admit("What is a deadlock in operating systems? Explain with an example.")
///     .unwrap();
/// assert_eq!(admitted.subject, "Operating Systems");
///
/// let rejected = pipeline.admit("Draw the state diagram of a deadlock detector");
/// assert_eq!(rejected, Err(Rejection::DiagramDetected));
/// ```
#[derive(Debug)]
pub struct AdmissionPipeline {
    classifier: SubjectClassifier,
    diagram: DiagramDetector,
    math: MathDetector,
    config: AdmissionConfig,
}

impl AdmissionPipeline {
    /// Build a pipeline around an already compiled classifier.
    pub fn new(classifier: SubjectClassifier, config: AdmissionConfig) -> Self {
        Self {
            classifier,
            diagram: DiagramDetector::new(),
            math: MathDetector::new(),
            config,
        }
    }

    /// Compile the classifier for `kb` and take thresholds from `config`.
    pub fn from_config(kb: &KnowledgeBase, config: &AppConfig) -> Result<Self, KnowledgeError> {
        let classifier = SubjectClassifier::new(kb, config.classifier.clone())?;
        Ok(Self::new(classifier, config.admission.clone()))
    }

    /// The classifier used by the subject gate.
    pub fn classifier(&self) -> &SubjectClassifier {
        &self.classifier
    }

    /// Run every gate over `text`.
    pub fn admit(&self, text: &str) -> Result<AdmittedQuestion, Rejection> {
        let outcome = self.run_gates(text);
        match &outcome {
            Ok(q) => log::info!(
                "Admitted question: subject={} confidence={} words={}",
                q.subject,
                q.confidence,
                q.word_count
            ),
            Err(r) => log::info!("Rejected question: {} ({r})", r.code()),
        }
        outcome
    }

    fn run_gates(&self, text: &str) -> Result<AdmittedQuestion, Rejection> {
        if text.trim().is_empty() {
            return Err(Rejection::NoText);
        }

        let word_count = long_token_count(text);
        let mut classification = None;

        for gate in &self.config.gates {
            match gate {
                Gate::WordCount => {
                    if word_count < self.config.min_word_count {
                        return Err(Rejection::InsufficientText {
                            word_count,
                            minimum: self.config.min_word_count,
                        });
                    }
                }
                Gate::Diagram => {
                    if self.diagram.detect(text) {
                        return Err(Rejection::DiagramDetected);
                    }
                }
                Gate::Subject => {
                    classification = Some(self.check_subject(text)?);
                }
                Gate::HeavyMath => {
                    if self.math.detect(text) {
                        return Err(Rejection::ComplexMath);
                    }
                }
            }
            log::debug!("Gate {} passed", gate.label());
        }

        let result = match classification {
            Some(result) => result,
            None => self.check_subject(text)?,
        };

        Ok(AdmittedQuestion {
            text: text.to_owned(),
            subject: result.primary_subject.unwrap_or_default(),
            confidence: result.confidence,
            word_count,
            matched_keywords: result.matched_keywords,
        })
    }

    fn check_subject(&self, text: &str) -> Result<ClassificationResult, Rejection> {
        let result = self.classifier.classify(text);
        if result.is_rejected() {
            return Err(Rejection::NotCsDomain {
                reason: result.reason.unwrap_or(RejectionReason::NoStrongKeywords),
            });
        }
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
