use serde::Serialize;
use thiserror::Error;

/// Structural limits applied to every incoming query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationLimits {
    /// Minimum cleaned length in characters.
    pub min_length: usize,
    /// Maximum cleaned length in characters.
    pub max_length: usize,
    /// Maximum fraction of the text allowed outside the basic
    /// sentence-punctuation set (0.0–1.0).
    pub max_special_char_ratio: f32,
    /// Minimum word count (whitespace split).
    pub min_words: usize,
    /// Maximum word count.
    pub max_words: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 500,
            max_special_char_ratio: 0.3,
            min_words: 1,
            max_words: 100,
        }
    }
}

impl ValidationLimits {
    /// Check the internal invariants. Called once at startup — limits are
    /// immutable afterwards.
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.min_length > self.max_length {
            return Err(LimitsError::LengthBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if self.min_words > self.max_words {
            return Err(LimitsError::WordBounds {
                min: self.min_words,
                max: self.max_words,
            });
        }
        if !(0.0..=1.0).contains(&self.max_special_char_ratio) {
            return Err(LimitsError::RatioBounds(self.max_special_char_ratio));
        }
        Ok(())
    }
}

/// Invalid limit combinations, rejected at construction time.
#[derive(Debug, Error)]
pub enum LimitsError {
    #[error("min_length {min} exceeds max_length {max}")]
    LengthBounds { min: usize, max: usize },
    #[error("min_words {min} exceeds max_words {max}")]
    WordBounds { min: usize, max: usize },
    #[error("max_special_char_ratio {0} outside [0, 1]")]
    RatioBounds(f32),
}

/// Why a query was rejected. The `Display` text is the user-facing message;
/// exactly one reason is reported per query (first failure wins).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("Input cannot be empty or contain only whitespace.")]
    Empty,
    #[error("Input too short. Please provide at least {min} characters.")]
    TooShort { min: usize },
    #[error("Input too long. Please limit to {max} characters.")]
    TooLong { max: usize },
    #[error("Please provide a more detailed query.")]
    TooFewWords,
    #[error("Query too long. Please be more concise.")]
    TooManyWords,
    #[error("Input contains potentially harmful content. Please rephrase your query.")]
    MaliciousContent,
    #[error("Input contains invalid characters. Please use only letters, numbers, and basic punctuation.")]
    InvalidCharacters,
    #[error("Too many special characters. Please use standard text.")]
    TooManySpecialChars,
    #[error("An error occurred while processing your input.")]
    Internal,
}

/// Advisory shown when a valid query carries no medical vocabulary.
pub const OFF_TOPIC_NOTICE: &str =
    "This doesn't appear to be health-related. I work best with medical questions.";

/// Advisory shown when a valid query matches an urgency phrase.
pub const URGENT_CARE_NOTICE: &str =
    "⚠️ For urgent medical concerns, please contact emergency services immediately!";

/// Advisory shown when the confidence score falls below this threshold.
pub const LOW_CONFIDENCE_NOTICE: &str =
    "Your query might be unclear. Consider adding more details.";

/// Confidence below which the unclear-query advisory is attached.
pub const LOW_CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Outcome of the full validation gate for one query.
///
/// Constructed fresh per call and immutable once returned. The serialized
/// field names are the wire format of `POST /api/health/validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Escaped, whitespace-normalized text. Empty unless valid.
    pub cleaned_input: String,
    /// User-facing rejection message. Empty unless invalid.
    pub error_message: String,
    /// Pipe-joined advisories. Only produced for valid queries.
    pub warning_message: String,
    pub is_health_related: bool,
    pub has_urgency: bool,
    pub confidence_score: f32,
    /// Programmatic rejection reason, not part of the wire format.
    #[serde(skip)]
    pub reason: Option<RejectReason>,
}

impl ValidationReport {
    /// Report for a query that failed a gate stage.
    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            is_valid: false,
            cleaned_input: String::new(),
            error_message: reason.to_string(),
            warning_message: String::new(),
            is_health_related: false,
            has_urgency: false,
            confidence_score: 0.0,
            reason: Some(reason),
        }
    }
}
