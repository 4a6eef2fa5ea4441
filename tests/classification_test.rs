use std::sync::Arc;

use cs_helper::classify::{matches, Confidence, RejectionReason, SubjectClassifier, NO_SUBJECT};
use cs_helper::config::AppConfig;
use cs_helper::detect::{looks_like_diagram, looks_like_heavy_math};
use cs_helper::knowledge::{KnowledgeBase, SubjectEntry};
use cs_helper::pipeline::{AdmissionPipeline, Rejection};

fn synthetic_kb() -> KnowledgeBase {
    KnowledgeBase::from_json(
        r#"{
            "Operating Systems": {
                "keywords": ["deadlock", "semaphore", "page replacement"],
                "synonyms": { "deadlock": ["circular wait"] }
            },
            "Data Structures": {
                "keywords": ["binary search tree", "stack", "queue"],
                "synonyms": { "binary search tree": ["bst"] }
            },
            "Computer Networks": {
                "keywords": ["tcp", "udp", "routing"]
            }
        }"#,
    )
    .expect("valid knowledge base")
}

fn classifier() -> SubjectClassifier {
    SubjectClassifier::with_defaults(&synthetic_kb()).expect("compile")
}

#[test]
fn deadlock_question_end_to_end() {
    let result =
        classifier().classify("What is a deadlock in operating systems? Explain with an example.");
    assert_eq!(result.primary_subject.as_deref(), Some("Operating Systems"));
    assert!(result.confidence >= Confidence::Medium);
    assert!(result.matched_keywords.iter().any(|k| k == "deadlock"));
    assert_eq!(result.subjects[0], "Operating Systems");
}

#[test]
fn short_inputs_are_always_insufficient() {
    let c = classifier();
    for text in ["", "   ", "what is tcp", "Explain BST?!", "deadlock.........."] {
        let result = c.classify(text);
        assert_eq!(result.confidence, Confidence::None, "{text:?}");
        assert_eq!(result.reason, Some(RejectionReason::InsufficientText), "{text:?}");
        assert_eq!(result.subjects, [NO_SUBJECT]);
    }
}

#[test]
fn keyword_rich_statements_are_not_questions() {
    let result = classifier().classify("Deadlock semaphore TCP UDP binary search tree stack");
    assert_eq!(result.confidence, Confidence::None);
    assert_eq!(result.reason, Some(RejectionReason::NotAQuestion));
}

#[test]
fn synonym_hit_reports_canonical_keyword() {
    let result = classifier().classify("Explain why circular wait is necessary");
    assert_eq!(result.primary_subject.as_deref(), Some("Operating Systems"));
    assert_eq!(result.matched_keywords, ["deadlock"]);
    assert_eq!(result.confidence, Confidence::Medium);
}

#[test]
fn multi_word_phrase_outranks_single_words() {
    let result = classifier().classify(
        "Explain how TCP and UDP differ, and how a binary search tree is stored",
    );
    assert_eq!(result.subjects, ["Data Structures", "Computer Networks"]);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.all_matches[1].confidence, Confidence::Medium);
}

#[test]
fn cost_does_not_match_os() {
    let kb = KnowledgeBase::from_entries(vec![SubjectEntry::new("Operating Systems")
        .with_keywords(["os"])])
    .expect("kb");
    let c = SubjectClassifier::with_defaults(&kb).expect("compile");
    assert!(c.classify("Explain the total cost of ownership").is_rejected());
    assert!(!c.classify("Explain what an os does for programs").is_rejected());
}

#[test]
fn matcher_properties() {
    assert!(matches("Binary Search Tree problem", "binary search tree"));
    for text in ["system", "the operating system", "SYSTEM SYSTEM"] {
        assert!(!matches(text, "system"));
    }
    assert!(matches("binary one two three search tree", "binary search tree"));
    assert!(!matches("binary one two three four search tree", "binary search tree"));
    assert!(!matches("binary search binary search search", "binary search tree"));
}

#[test]
fn detector_properties() {
    assert!(looks_like_diagram("→ ab ← cd ┌ ┘"));
    assert!(!looks_like_diagram(""));
    assert!(!looks_like_heavy_math(""));
    assert!(!looks_like_heavy_math("Explain the time complexity of merge sort"));
    assert!(looks_like_heavy_math("Explain the time complexity ∑ of merge sort"));
}

#[test]
fn classification_is_deterministic_across_threads() {
    let c = Arc::new(classifier());
    let text = "Explain how a stack and a queue differ from a binary search tree";
    let expected = c.classify(text);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let c = Arc::clone(&c);
            std::thread::spawn(move || c.classify(text))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread"), expected);
    }
}

#[test]
fn builtin_knowledge_base_admits_common_questions() {
    let kb = KnowledgeBase::builtin().expect("builtin");
    let pipeline = AdmissionPipeline::from_config(&kb, &AppConfig::default()).expect("pipeline");

    let q = pipeline
        .admit("Explain the working of the sliding window protocol used for flow control")
        .expect("admitted");
    assert_eq!(q.subject, "Computer Networks");
    assert_eq!(q.confidence, Confidence::High);

    let q = pipeline
        .admit("What is a semaphore? Explain its use in solving the critical section problem.")
        .expect("admitted");
    assert_eq!(q.subject, "Operating Systems");

    assert_eq!(
        pipeline.admit("Draw the ER diagram for a hospital management database"),
        Err(Rejection::DiagramDetected)
    );
    assert!(matches!(
        pipeline.admit("Explain the historical causes of the French revolution"),
        Err(Rejection::NotCsDomain { .. })
    ));
}
