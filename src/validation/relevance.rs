//! Lexical health-relevance classification — the third gate stage.
//!
//! Substring matching against two fixed term lists plus a small heuristic
//! confidence score. This estimates how well-formed and on-topic a query
//! is; it makes no clinical judgment.

/// Vocabulary that marks a query as health-related.
const MEDICAL_TERMS: &[&str] = &[
    "pain", "ache", "hurt", "sore", "fever", "headache", "nausea", "dizzy",
    "fatigue", "tired", "weak", "cough", "cold", "flu", "infection", "allergy",
    "symptoms", "symptom", "feel", "feeling", "sick", "ill", "disease",
    "condition", "diagnosis", "treatment", "medicine", "medication", "drug",
    "doctor", "physician", "hospital", "clinic", "medical", "health",
    "chest", "stomach", "back", "head", "throat", "ear", "eye", "skin",
];

/// Phrases that suggest the user may need emergency care. Matched as
/// literal substrings, so multi-word phrases work without tokenization.
const URGENCY_KEYWORDS: &[&str] = &[
    "emergency", "urgent", "severe", "intense", "extreme", "unbearable",
    "sudden", "acute", "critical", "can't breathe", "chest pain", "heart attack",
];

/// Per-term confidence contribution and its cap.
const TERM_WEIGHT: f32 = 0.15;
const TERM_CAP: f32 = 0.5;

/// What the classifier derives from one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceSignals {
    pub is_health_related: bool,
    pub has_urgency: bool,
    /// Heuristic well-formedness estimate in [0, 1].
    pub confidence: f32,
}

/// Classify the literal (unescaped) query text.
pub fn classify(literal: &str) -> RelevanceSignals {
    let lower = literal.to_lowercase();

    let matched_terms = MEDICAL_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    let is_health_related = matched_terms > 0;
    let has_urgency = URGENCY_KEYWORDS.iter().any(|phrase| lower.contains(phrase));

    let mut confidence = 0.0_f32;
    if lower.split_whitespace().count() >= 3 {
        confidence += 0.2;
    }
    confidence += (matched_terms as f32 * TERM_WEIGHT).min(TERM_CAP);
    if lower.contains('?') {
        confidence += 0.1;
    }

    RelevanceSignals {
        is_health_related,
        has_urgency,
        confidence: confidence.min(1.0),
    }
}
