//! Recovery of plain text from double-encoded step payloads.
//!
//! Stored step inputs have historically been wrapped more than once: a
//! string containing JSON containing a `"text"` field containing more
//! JSON. The functions here are total (they never fail) and bounded, so
//! a pathological payload can never loop forever.

use serde_json::Value;

/// Maximum number of decode iterations before giving up on a payload.
const MAX_COLLAPSE_DEPTH: usize = 3;

/// Extract the human-entered text from a possibly wrapped value.
///
/// Rules, applied recursively:
/// - `Null` yields `""`;
/// - an object with a `"text"` field recurses into that field; an object
///   without one yields `""`;
/// - a string that looks like JSON is parsed and recursed into; if the
///   parse yields an object or array with no recoverable text the result
///   is `""`, and if the parse fails the original string is returned
///   unchanged;
/// - any other string is returned as-is;
/// - numbers, booleans and arrays yield `""`.
pub fn unwrap_text(value: &Value) -> String {
    unwrap_text_bounded(value, MAX_COLLAPSE_DEPTH)
}

fn unwrap_text_bounded(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => String::new(),
        // Descending into a parsed value is always finite; only repeated
        // string parsing consumes the depth budget.
        Value::Object(map) => match map.get("text") {
            Some(inner) => unwrap_text_bounded(inner, depth),
            None => String::new(),
        },
        Value::String(s) => {
            if depth > 0 && looks_like_json(s) {
                match serde_json::from_str::<Value>(s) {
                    Ok(parsed) => match parsed {
                        Value::Object(_) => unwrap_text_bounded(&parsed, depth - 1),
                        Value::Array(_) => String::new(),
                        Value::String(_) => unwrap_text_bounded(&parsed, depth - 1),
                        _ => String::new(),
                    },
                    Err(_) => s.clone(),
                }
            } else {
                s.clone()
            }
        }
        _ => String::new(),
    }
}

/// Collapse layers of string-encoded JSON into the value they encode.
///
/// A string whose content parses as JSON is replaced by the parsed value
/// and the process repeats, at most [`MAX_COLLAPSE_DEPTH`] times. Strings
/// that do not look like JSON are left alone so plain prose (including
/// text like "123") survives unchanged.
pub fn collapse_encoded(value: Value) -> Value {
    let mut current = value;
    for _ in 0..MAX_COLLAPSE_DEPTH {
        match current {
            Value::String(ref s) if looks_like_json(s) => {
                match serde_json::from_str::<Value>(s) {
                    Ok(parsed) => current = parsed,
                    Err(_) => break,
                }
            }
            _ => break,
        }
    }
    current
}

/// Recover plain text from a raw stored string.
pub fn unwrap_stored(raw: &str) -> String {
    unwrap_text(&collapse_encoded(Value::String(raw.to_string())))
}

/// Whether a string plausibly encodes a JSON document.
///
/// Only object, array and string forms are considered; bare numbers and
/// keywords are treated as prose.
fn looks_like_json(s: &str) -> bool {
    matches!(
        s.trim_start().chars().next(),
        Some('{') | Some('[') | Some('"')
    )
}
