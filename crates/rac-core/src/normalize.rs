//! Tolerant extraction of JSON from LLM response text.
//!
//! Providers frequently wrap JSON in markdown fences, prepend prose, or
//! emit literal newlines inside string values. Extraction tries a fixed
//! sequence of repair strategies and fails only when all of them fail.

use serde_json::Value;

use crate::error::{Result, WizardError};

/// Extract a JSON value from raw LLM response text.
///
/// Strategies are attempted in order and the first successful parse wins:
///
/// 1. strip markdown code fences and surrounding whitespace, then parse;
/// 2. isolate the substring from the first `{` to the last `}` of the
///    raw text and parse that;
/// 3. escape literal newlines that appear inside string values of the
///    fence-stripped text, then parse.
///
/// When every strategy fails the error carries a bounded snippet of the
/// offending text for diagnostics.
pub fn normalize(raw: &str) -> Result<Value> {
    let cleaned = strip_fences(raw);

    if let Ok(value) = serde_json::from_str(cleaned) {
        return Ok(value);
    }

    if let Some(isolated) = isolate_braces(raw) {
        if let Ok(value) = serde_json::from_str(isolated) {
            return Ok(value);
        }
    }

    let repaired = escape_newlines_in_strings(cleaned);
    if let Ok(value) = serde_json::from_str(&repaired) {
        return Ok(value);
    }

    Err(WizardError::malformed_response(raw))
}

/// Remove a leading markdown fence (with optional language tag) and a
/// trailing fence, trimming surrounding whitespace.
fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Drop the language tag line (e.g. "json") if present.
        text = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            None => rest,
        };
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// The substring from the first `{` to the last `}`, inclusive.
fn isolate_braces(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Replace literal newline characters that occur inside quoted strings
/// with their escaped forms, leaving structural whitespace untouched.
///
/// The scanner tracks whether it is inside a string and honors backslash
/// escapes, so an escaped quote does not end the string.
fn escape_newlines_in_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(ch);
                continue;
            }
            match ch {
                '\\' => {
                    escaped = true;
                    out.push(ch);
                }
                '"' => {
                    in_string = false;
                    out.push(ch);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(ch),
            }
        } else {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json_passes_through() {
        let value = normalize(r#"{"result": {"ok": true}, "confidence": 0.9}"#).unwrap();
        assert_eq!(value["confidence"], json!(0.9));
    }

    #[test]
    fn test_strips_fences_with_language_tag() {
        let raw = "```json\n{\"result\": 1}\n```";
        let value = normalize(raw).unwrap();
        assert_eq!(value, json!({"result": 1}));
    }

    #[test]
    fn test_strips_bare_fences() {
        let raw = "```\n{\"result\": 1}\n```";
        assert_eq!(normalize(raw).unwrap(), json!({"result": 1}));
    }

    #[test]
    fn test_isolates_braces_from_prose() {
        let raw = "Here is the JSON you asked for:\n{\"a\": 1}\nHope that helps!";
        assert_eq!(normalize(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_brace_isolation_wins_over_newline_repair() {
        // Both remaining strategies can parse this text: isolating the
        // braces yields the empty object, while escaping the newline
        // would turn the whole response into one big JSON string.
        // Isolation runs first and its parse must win.
        let raw = "\"model said:\n{} done\"";
        assert_eq!(normalize(raw).unwrap(), json!({}));
    }

    #[test]
    fn test_repairs_literal_newlines_inside_strings() {
        let raw = "{\"text\": \"line one\nline two\"}";
        let value = normalize(raw).unwrap();
        assert_eq!(value["text"], json!("line one\nline two"));
    }

    #[test]
    fn test_repairs_newlines_inside_fenced_strings() {
        let raw = "```json\n{\"text\": \"a\nb\"}\n```";
        let value = normalize(raw).unwrap();
        assert_eq!(value["text"], json!("a\nb"));
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let raw = "{\"text\": \"she said \\\"hi\\\"\nbye\"}";
        let value = normalize(raw).unwrap();
        assert_eq!(value["text"], json!("she said \"hi\"\nbye"));
    }

    #[test]
    fn test_structural_newlines_survive_repair() {
        let raw = "{\n  \"a\": 1,\n  \"b\": \"x\ny\"\n}";
        let value = normalize(raw).unwrap();
        assert_eq!(value["a"], json!(1));
        assert_eq!(value["b"], json!("x\ny"));
    }

    #[test]
    fn test_unrecoverable_text_reports_bounded_snippet() {
        let raw = "x".repeat(5000);
        let err = normalize(&raw).unwrap_err();
        match err {
            WizardError::MalformedResponse { snippet } => {
                assert_eq!(snippet.chars().count(), 1000);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_response_is_malformed() {
        assert!(matches!(
            normalize(""),
            Err(WizardError::MalformedResponse { .. })
        ));
    }
}
