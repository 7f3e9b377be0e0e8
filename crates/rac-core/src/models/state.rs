//! Step lifecycle states.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of step lifecycle states.
///
/// Derived from a step record's fields rather than stored: a record with
/// no output is `Empty`, a record with unapproved output is `Drafted`,
/// and an approved record is `Approved`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    /// No output has been produced yet
    #[default]
    Empty,

    /// Output exists but has not been approved
    Drafted,

    /// Output has been approved and may feed the next step
    Approved,
}

impl FromStr for StepState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "empty" => Ok(StepState::Empty),
            "drafted" => Ok(StepState::Drafted),
            "approved" => Ok(StepState::Approved),
            _ => Err(format!("Invalid step state: {s}")),
        }
    }
}

impl StepState {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepState::Empty => "empty",
            StepState::Drafted => "drafted",
            StepState::Approved => "approved",
        }
    }

    /// State with a consistent icon for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepState::Empty => "○ Empty",
            StepState::Drafted => "➤ Drafted",
            StepState::Approved => "✓ Approved",
        }
    }
}
