//! Step record model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StepState;

/// A single methodology step within a project.
///
/// Every project owns one record per methodology step, created empty at
/// project creation time. The record accumulates the raw input fed to the
/// LLM, the structured result, any operator override, and the rendered
/// text operators review and approve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    /// Unique identifier for the step record
    pub id: u64,

    /// ID of the parent project
    pub project_id: u64,

    /// Phase the step belongs to (e.g. "Preparation")
    pub phase: String,

    /// Display name of the step (e.g. "Segment Text")
    pub name: String,

    /// Position in the flattened methodology sequence (0-indexed)
    pub ordinal: u32,

    /// Input text that was (or will be) sent to the LLM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,

    /// Structured JSON result extracted from the LLM response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_result: Option<Value>,

    /// Operator-supplied replacement for the structured result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_override: Option<Value>,

    /// Whether an operator has modified the output
    #[serde(default)]
    pub human_modified: bool,

    /// Operator-facing rendered text; what approval signs off on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered_text: Option<String>,

    /// Model-reported confidence in the result, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Whether the rendered output has been approved
    #[serde(default)]
    pub approved: bool,

    /// Timestamp when the step record was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step record was last updated (UTC)
    pub updated_at: Timestamp,
}

impl StepRecord {
    /// Lifecycle state derived from the record's fields.
    pub fn state(&self) -> StepState {
        if self.approved {
            StepState::Approved
        } else if self.rendered_text.is_some() || self.structured_result.is_some() {
            StepState::Drafted
        } else {
            StepState::Empty
        }
    }

    /// The value that currently speaks for this step: the operator
    /// override when one exists, otherwise the structured result.
    pub fn authoritative_value(&self) -> Option<&Value> {
        if self.human_modified {
            self.human_override
                .as_ref()
                .or(self.structured_result.as_ref())
        } else {
            self.structured_result.as_ref()
        }
    }
}

impl Default for StepRecord {
    fn default() -> Self {
        Self {
            id: 0,
            project_id: 0,
            phase: String::new(),
            name: String::new(),
            ordinal: 0,
            raw_input: None,
            structured_result: None,
            human_override: None,
            human_modified: false,
            rendered_text: None,
            confidence: None,
            approved: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
