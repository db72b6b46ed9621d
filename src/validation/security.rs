//! Security filter — the second gate stage.
//!
//! Scans for known injection signatures, enforces the allowed-character
//! alphabet, and bounds the special-character ratio. Checks run in that
//! order against the literal query text and the first failure is terminal.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{RejectReason, ValidationLimits};

/// Injection signatures, evaluated case-insensitively in order.
/// Defense-in-depth: markup is already escaped in the stored form, but a
/// query carrying any of these is rejected outright rather than forwarded.
static INJECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)<script.*?>.*?</script>",
        r"(?i)javascript:",
        r"(?i)on\w+\s*=",
        r"(?i)<iframe.*?>",
        r"(?i)<object.*?>",
        r"(?i)<embed.*?>",
        r"(?i)eval\s*\(",
        r"(?i)document\.",
        r"(?i)window\.",
        r"(?i)\.innerHTML",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid injection pattern"))
    .collect()
});

/// Full allowed alphabet: ASCII alphanumerics, whitespace, and basic
/// punctuation. Anything else anywhere rejects the query.
static ALLOWED_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[a-zA-Z0-9\s.,!?;:()\-'"]+$"#).expect("Invalid allowed-text pattern")
});

/// Characters that do not count toward the special-character ratio: the
/// sentence-punctuation subset of the allowed alphabet. Structural
/// punctuation (`; : ( ) "`) passes the whitelist but counts as noise.
fn is_plain_text_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '.' | ',' | '!' | '?' | '\'' | '-')
}

/// Run the three security checks against the literal query text.
pub fn check_security(literal: &str, limits: &ValidationLimits) -> Result<(), RejectReason> {
    if INJECTION_PATTERNS.iter().any(|p| p.is_match(literal)) {
        return Err(RejectReason::MaliciousContent);
    }

    if !ALLOWED_TEXT.is_match(literal) {
        return Err(RejectReason::InvalidCharacters);
    }

    let total = literal.chars().count();
    if total > 0 {
        let special = literal.chars().filter(|c| !is_plain_text_char(*c)).count();
        let ratio = special as f32 / total as f32;
        if ratio > limits.max_special_char_ratio {
            return Err(RejectReason::TooManySpecialChars);
        }
    }

    Ok(())
}
