//! Parameter structures for wizard operations.
//!
//! Shared parameter structures usable across interfaces (CLI today,
//! other front ends later) without framework-specific derives. Interface
//! layers define their own wrapper structs with the derives they need
//! and convert into these via `From`.

use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_project and delete_project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    /// Name of the project (required)
    pub name: String,
    /// Optional detailed description of the project
    pub description: Option<String>,
}

/// Parameters for deleting a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteProject {
    /// The ID of the project to delete
    pub id: u64,
    /// Whether the caller has confirmed the deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Identity of a step within a project.
///
/// Steps are addressed by the (project, phase, name) triple rather than
/// by row ID so callers can use the names the methodology defines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepLocator {
    /// The ID of the owning project
    pub project_id: u64,
    /// Phase the step belongs to
    pub phase: String,
    /// Display name of the step
    pub name: String,
}

/// Parameters for processing a step through the LLM.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessStep {
    /// Which step to process
    pub locator: StepLocator,
    /// Explicit input text; when absent the input is resolved from the
    /// approved predecessor or the step's stored raw input
    pub input: Option<String>,
}

/// Parameters for replacing a step's output with operator text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditStepOutput {
    /// Which step to edit
    pub locator: StepLocator,
    /// Replacement text for the step's output
    pub text: String,
}
