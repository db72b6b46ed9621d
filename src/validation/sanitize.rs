//! Query text cleanup — the first gate stage.
//!
//! Normalizes raw input (trim, markup escape, whitespace collapse) and
//! rejects structurally invalid queries before any pattern scanning runs.

use super::types::{RejectReason, ValidationLimits};

/// The five entity sequences the escaper emits. An `&` that already begins
/// one of these is left alone so that cleaning is idempotent.
const ENTITY_TAILS: &[&str] = &["amp;", "lt;", "gt;", "quot;", "#x27;"];

/// A cleaned query: trimmed, markup-escaped, whitespace-normalized.
///
/// `text()` is the escaped form stored and returned to clients;
/// `literal()` decodes exactly the entities our own escaper emits, and is
/// what the security filter and relevance classifier operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanQuery {
    text: String,
}

impl CleanQuery {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// The query as the user typed it, modulo trimming and whitespace
    /// collapse. Entities other than our own five are left untouched.
    pub fn literal(&self) -> String {
        decode_markup(&self.text)
    }
}

/// Clean a raw query and apply the structural limits.
///
/// Escape runs before whitespace collapsing; length and word-count checks
/// apply to the cleaned (escaped) text, character-counted, and length is
/// checked before word count.
pub fn sanitize_query(
    raw: &str,
    limits: &ValidationLimits,
) -> Result<CleanQuery, RejectReason> {
    let text = collapse_whitespace(&escape_markup(raw.trim()));

    if text.is_empty() {
        return Err(RejectReason::Empty);
    }

    let char_count = text.chars().count();
    if char_count < limits.min_length {
        return Err(RejectReason::TooShort {
            min: limits.min_length,
        });
    }
    if char_count > limits.max_length {
        return Err(RejectReason::TooLong {
            max: limits.max_length,
        });
    }

    let word_count = text.split_whitespace().count();
    if word_count < limits.min_words {
        return Err(RejectReason::TooFewWords);
    }
    if word_count > limits.max_words {
        return Err(RejectReason::TooManyWords);
    }

    Ok(CleanQuery { text })
}

/// Escape markup-significant characters to HTML entities.
///
/// An `&` that already starts one of our own entity sequences is copied
/// verbatim, so applying the escape twice yields the same string.
fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '&' => {
                let tail = &text[i + 1..];
                if ENTITY_TAILS.iter().any(|t| tail.starts_with(t)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Collapse every run of whitespace to a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_gap {
                out.push(' ');
            }
            in_gap = true;
        } else {
            out.push(c);
            in_gap = false;
        }
    }
    out
}

/// Decode the five entities emitted by [`escape_markup`]. Single pass, so a
/// decoded character never re-combines with its neighbors into a second
/// entity.
fn decode_markup(text: &str) -> String {
    const ENTITIES: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#x27;", '\''),
    ];

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        let rest = &text[i..];
        if let Some((entity, decoded)) =
            ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity))
        {
            out.push(*decoded);
            i += entity.len();
        } else {
            out.push(c);
            i += c.len_utf8();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ValidationLimits {
        ValidationLimits::default()
    }

    // =================================================================
    // CLEANING
    // =================================================================

    #[test]
    fn clean_input_unchanged() {
        let clean = sanitize_query("I have a headache and fever", &limits()).unwrap();
        assert_eq!(clean.text(), "I have a headache and fever");
        assert_eq!(clean.literal(), "I have a headache and fever");
    }

    #[test]
    fn trims_and_collapses_whitespace() {
        let clean = sanitize_query("  what   causes \t\n dizziness  ", &limits()).unwrap();
        assert_eq!(clean.text(), "what causes dizziness");
    }

    #[test]
    fn escapes_markup_characters() {
        let clean = sanitize_query("is 5<6 & \"BP\" normal? don't know", &limits()).unwrap();
        assert_eq!(
            clean.text(),
            "is 5&lt;6 &amp; &quot;BP&quot; normal? don&#x27;t know"
        );
        assert_eq!(clean.literal(), "is 5<6 & \"BP\" normal? don't know");
    }

    #[test]
    fn escape_runs_before_whitespace_collapse() {
        let clean = sanitize_query("a  <  b", &limits()).unwrap();
        assert_eq!(clean.text(), "a &lt; b");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_query("I can't breathe, severe chest pain!", &limits()).unwrap();
        let twice = sanitize_query(once.text(), &limits()).unwrap();
        assert_eq!(once.text(), twice.text());
    }

    // =================================================================
    // STRUCTURAL REJECTIONS
    // =================================================================

    #[test]
    fn empty_input_rejected() {
        assert_eq!(sanitize_query("", &limits()), Err(RejectReason::Empty));
    }

    #[test]
    fn whitespace_only_rejected() {
        assert_eq!(sanitize_query("   \t\n  ", &limits()), Err(RejectReason::Empty));
    }

    #[test]
    fn too_short_rejected() {
        assert_eq!(
            sanitize_query("ok", &limits()),
            Err(RejectReason::TooShort { min: 3 })
        );
    }

    #[test]
    fn too_long_rejected() {
        let long = "a".repeat(501);
        assert_eq!(
            sanitize_query(&long, &limits()),
            Err(RejectReason::TooLong { max: 500 })
        );
    }

    #[test]
    fn length_checked_before_word_count() {
        // 167 words but 500+ chars: the length rejection must win
        let long = "word ".repeat(167);
        assert_eq!(
            sanitize_query(&long, &limits()),
            Err(RejectReason::TooLong { max: 500 })
        );
    }

    #[test]
    fn too_many_words_rejected() {
        let wordy = "flu ".repeat(101);
        assert_eq!(sanitize_query(&wordy, &limits()), Err(RejectReason::TooManyWords));
    }

    #[test]
    fn word_minimum_applies_after_cleaning() {
        let tight = ValidationLimits {
            min_words: 3,
            ..ValidationLimits::default()
        };
        assert_eq!(
            sanitize_query("headache now", &tight),
            Err(RejectReason::TooFewWords)
        );
    }

    // =================================================================
    // ESCAPE / DECODE HELPERS
    // =================================================================

    #[test]
    fn escape_is_idempotent_on_entities() {
        let escaped = escape_markup("don't <b>");
        assert_eq!(escaped, "don&#x27;t &lt;b&gt;");
        assert_eq!(escape_markup(&escaped), escaped);
    }

    #[test]
    fn bare_ampersand_still_escaped() {
        assert_eq!(escape_markup("salt & water"), "salt &amp; water");
    }

    #[test]
    fn decode_does_not_cascade() {
        // "&amp;lt;" decodes to the literal text "&lt;", not to "<"
        assert_eq!(decode_markup("&amp;lt;"), "&lt;");
    }

    #[test]
    fn decode_preserves_unknown_entities() {
        assert_eq!(decode_markup("&nbsp; x"), "&nbsp; x");
    }
}
