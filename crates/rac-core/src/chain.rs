//! Input chaining between consecutive methodology steps.

use crate::models::StepRecord;
use crate::unwrap::unwrap_stored;

/// Resolve the working input for a step.
///
/// Three tiers, first match wins:
///
/// 1. the immediate predecessor, when approved and carrying non-empty
///    rendered text, supplies that text (unwrapped, so a structured JSON
///    blob in the rendered slot never leaks forward as prose);
/// 2. the step's own stored raw input, unwrapped from any legacy JSON
///    encoding;
/// 3. the empty string.
///
/// Only the immediate predecessor is ever consulted. An approved step
/// further back never feeds forward past an unapproved one, so stale
/// output cannot leak into later phases.
pub fn resolve_initial_input(target: &StepRecord, predecessor: Option<&StepRecord>) -> String {
    if let Some(prev) = predecessor {
        if prev.approved {
            if let Some(text) = prev.rendered_text.as_deref() {
                let unwrapped = unwrap_stored(text);
                if !unwrapped.trim().is_empty() {
                    return unwrapped;
                }
            }
        }
    }

    if let Some(raw) = target.raw_input.as_deref() {
        let unwrapped = unwrap_stored(raw);
        if !unwrapped.trim().is_empty() {
            return unwrapped;
        }
    }

    String::new()
}
