//! Pure utility functions for text normalization
//!
//! These functions contain NO side effects - they take inputs and return outputs
//! without touching databases, making API calls, or performing I/O.
//! This makes them easy to test and reason about.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Maximum length of any normalized text field.
pub const MAX_TEXT_LEN: usize = 5000;

lazy_static! {
    // Best-effort tag stripper; does not decode entities
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a text field: strip HTML tags, collapse whitespace runs to
/// single spaces, trim, and truncate to [`MAX_TEXT_LEN`] characters.
///
/// Never fails; garbage in, empty string out.
pub fn normalize_str(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    truncate_chars(collapsed.trim(), MAX_TEXT_LEN)
}

/// Normalize an arbitrary JSON value into a text field.
///
/// Strings are normalized as-is; numbers and booleans are coerced to their
/// display form first; null, arrays, and objects become the empty string.
pub fn normalize_value(value: &Value) -> String {
    normalize_str(&value_to_string(value))
}

/// Coerce a scalar JSON value to a plain string without any cleanup.
///
/// Callers that need line structure preserved (e.g. requirements derivation)
/// use this instead of [`normalize_value`].
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}
