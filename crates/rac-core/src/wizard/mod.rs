//! High-level wizard API for managing projects and methodology steps.
//!
//! The [`Wizard`] is the central coordinator between the interfaces and
//! the database, implementing all business logic for project and step
//! operations: step navigation, input chaining, LLM processing, operator
//! overrides and approvals.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Wizard`] instances with configuration
//! - [`project_ops`]: Project operations (create, list, show, delete)
//! - [`step_ops`]: Step operations (show, resolve input, approve, edit, reset)
//! - [`process`]: LLM-backed step processing
//!
//! ## Design Principles
//!
//! 1. **Async First**: All operations are async-compatible
//! 2. **Error Propagation**: Comprehensive error handling with context
//! 3. **Transaction Safety**: Database operations use proper transaction boundaries
//! 4. **Display Integration**: Results formatted via the display system

use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::LlmClient;
use crate::methodology::Methodology;

// Module declarations
pub mod builder;
pub mod process;
pub mod project_ops;
pub mod step_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::WizardBuilder;

/// Main wizard interface for managing projects and steps.
pub struct Wizard {
    pub(crate) db_path: PathBuf,
    pub(crate) methodology: Arc<Methodology>,
    pub(crate) llm: Option<Arc<dyn LlmClient>>,
}

impl Wizard {
    /// Creates a new wizard with the specified database path.
    pub(crate) fn new(
        db_path: PathBuf,
        methodology: Arc<Methodology>,
        llm: Option<Arc<dyn LlmClient>>,
    ) -> Self {
        Self {
            db_path,
            methodology,
            llm,
        }
    }

    /// The methodology this wizard operates on.
    pub fn methodology(&self) -> &Methodology {
        &self.methodology
    }
}
