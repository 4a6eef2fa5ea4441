//! Admission pipeline module.
//!
//! Wires the content-shape detectors and the subject classifier into one
//! accept/reject decision for a piece of extracted question text.
//!
//! # Architecture
//!
//! ```text
//! extracted text (from OCR, opaque)
//!        │
//!        ▼
//! AdmissionPipeline::admit()
//!        │
//!        ├─ WordCount gate
//!        ├─ DiagramDetector
//!        ├─ SubjectClassifier   ← KnowledgeBase (compiled once)
//!        └─ MathDetector
//!        │
//!        ▼
//! Result<AdmittedQuestion, Rejection>  → answer generation (opaque)
//! ```

pub mod outcome;
pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use outcome::{AdmittedQuestion, Rejection};
pub use runner::AdmissionPipeline;
