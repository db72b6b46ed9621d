//! Query validation gate.
//!
//! Every incoming query passes three stages in order — cleanup, security
//! filter, relevance classification — short-circuiting at the first
//! failure. The gate itself is infallible: whatever happens inside, the
//! caller always gets a well-formed [`ValidationReport`].

pub mod relevance;
pub mod sanitize;
pub mod security;
pub mod types;

pub use relevance::{classify, RelevanceSignals};
pub use sanitize::{sanitize_query, CleanQuery};
pub use security::check_security;
pub use types::{
    LimitsError, RejectReason, ValidationLimits, ValidationReport,
    LOW_CONFIDENCE_NOTICE, LOW_CONFIDENCE_THRESHOLD, OFF_TOPIC_NOTICE, URGENT_CARE_NOTICE,
};

/// The gate that validates one raw query at a time.
///
/// Holds the structural limits; term lists and injection patterns are
/// process-wide statics. Stateless across calls — a single instance is
/// shared by every request.
#[derive(Debug, Clone)]
pub struct QueryGate {
    limits: ValidationLimits,
}

impl QueryGate {
    /// Gate with the default limits (always valid).
    pub fn new() -> Self {
        Self {
            limits: ValidationLimits::default(),
        }
    }

    /// Gate with custom limits, checked against their invariants.
    pub fn with_limits(limits: ValidationLimits) -> Result<Self, LimitsError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate a raw query. Never fails — rejections are folded into the
    /// returned report, and a panic anywhere in the pipeline degrades to a
    /// generic internal-error report instead of unwinding into the caller.
    pub fn validate(&self, raw: &str) -> ValidationReport {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.run(raw)));
        match outcome {
            Ok(Ok(report)) => report,
            Ok(Err(reason)) => {
                tracing::debug!(%reason, "query rejected");
                ValidationReport::rejected(reason)
            }
            Err(_) => {
                tracing::error!("validation pipeline panicked");
                ValidationReport::rejected(RejectReason::Internal)
            }
        }
    }

    fn run(&self, raw: &str) -> Result<ValidationReport, RejectReason> {
        let clean = sanitize_query(raw, &self.limits)?;

        // Security and relevance both look at the text as the user typed
        // it; the escaped form is what gets stored and returned.
        let literal = clean.literal();
        check_security(&literal, &self.limits)?;
        let signals = classify(&literal);

        let warning_message = advisories(&signals).join(" | ");
        tracing::debug!(
            health_related = signals.is_health_related,
            urgency = signals.has_urgency,
            confidence = signals.confidence,
            "query accepted"
        );

        Ok(ValidationReport {
            is_valid: true,
            cleaned_input: clean.into_text(),
            error_message: String::new(),
            warning_message,
            is_health_related: signals.is_health_related,
            has_urgency: signals.has_urgency,
            confidence_score: signals.confidence,
            reason: None,
        })
    }
}

impl Default for QueryGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Advisories attached to a valid query, in fixed order.
fn advisories(signals: &RelevanceSignals) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if !signals.is_health_related {
        notes.push(OFF_TOPIC_NOTICE);
    }
    if signals.has_urgency {
        notes.push(URGENT_CARE_NOTICE);
    }
    if signals.confidence < LOW_CONFIDENCE_THRESHOLD {
        notes.push(LOW_CONFIDENCE_NOTICE);
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> QueryGate {
        QueryGate::new()
    }

    // =================================================================
    // REJECTIONS
    // =================================================================

    #[test]
    fn empty_query_rejected() {
        let report = gate().validate("");
        assert!(!report.is_valid);
        assert_eq!(report.reason, Some(RejectReason::Empty));
        assert_eq!(
            report.error_message,
            "Input cannot be empty or contain only whitespace."
        );
    }

    #[test]
    fn short_query_rejected_after_cleaning() {
        let report = gate().validate("  a  ");
        assert_eq!(report.reason, Some(RejectReason::TooShort { min: 3 }));
    }

    #[test]
    fn script_tag_rejected_as_malicious() {
        let report = gate().validate("<script>alert(1)</script>");
        assert!(!report.is_valid);
        assert_eq!(report.reason, Some(RejectReason::MaliciousContent));
        assert!(report.cleaned_input.is_empty());
        assert!(report.warning_message.is_empty());
    }

    #[test]
    fn script_tag_rejected_regardless_of_surrounding_text() {
        let report =
            gate().validate("I have a headache <script>alert(1)</script> and a fever today");
        assert_eq!(report.reason, Some(RejectReason::MaliciousContent));
    }

    #[test]
    fn structural_punctuation_overload_rejected() {
        let report = gate().validate("ab: cd; ()");
        assert_eq!(report.reason, Some(RejectReason::TooManySpecialChars));
    }

    #[test]
    fn first_failure_wins() {
        // Over-long AND malicious: the sanitizer's length rejection runs first
        let long = format!("{} <script>x</script>", "a".repeat(500));
        let report = gate().validate(&long);
        assert_eq!(report.reason, Some(RejectReason::TooLong { max: 500 }));
    }

    // =================================================================
    // ACCEPTED QUERIES
    // =================================================================

    #[test]
    fn health_query_accepted_with_signals() {
        let report = gate().validate("I have a headache and fever");
        assert!(report.is_valid);
        assert_eq!(report.cleaned_input, "I have a headache and fever");
        assert!(report.error_message.is_empty());
        assert!(report.is_health_related);
        assert!(!report.has_urgency);
        assert!((report.confidence_score - 0.7).abs() < 1e-6);
        assert!(report.warning_message.is_empty());
    }

    #[test]
    fn urgent_query_carries_emergency_notice() {
        let report = gate().validate("I can't breathe, severe chest pain!");
        assert!(report.is_valid);
        assert!(report.has_urgency);
        assert!(report.warning_message.contains("emergency services"));
        assert_eq!(report.cleaned_input, "I can&#x27;t breathe, severe chest pain!");
    }

    #[test]
    fn off_topic_low_confidence_query_gets_both_notices() {
        let report = gate().validate("what time does the game start today");
        assert!(report.is_valid);
        assert!(!report.is_health_related);
        let notes: Vec<&str> = report.warning_message.split(" | ").collect();
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("health-related"));
        assert!(notes[1].contains("unclear"));
    }

    #[test]
    fn revalidating_cleaned_input_is_stable() {
        let first = gate().validate("I can't   breathe, severe chest pain!");
        assert!(first.is_valid);
        let second = gate().validate(&first.cleaned_input);
        assert!(second.is_valid);
        assert_eq!(first.cleaned_input, second.cleaned_input);
        assert_eq!(first.has_urgency, second.has_urgency);
    }

    #[test]
    fn custom_limits_are_applied() {
        let gate = QueryGate::with_limits(ValidationLimits {
            max_length: 20,
            ..ValidationLimits::default()
        })
        .unwrap();
        let report = gate.validate("this query is definitely longer than twenty");
        assert_eq!(report.reason, Some(RejectReason::TooLong { max: 20 }));
    }

    #[test]
    fn invalid_limits_refused() {
        let result = QueryGate::with_limits(ValidationLimits {
            min_length: 10,
            max_length: 5,
            ..ValidationLimits::default()
        });
        assert!(result.is_err());
    }
}
