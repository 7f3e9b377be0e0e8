//! Data models for projects and methodology steps.
//!
//! The core domain models for the Rules-as-Code wizard. Display
//! implementations live in [`crate::display::models`] to keep data
//! structures separate from presentation.

pub mod project;
pub mod state;
pub mod step;
pub mod summary;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level.
pub use project::Project;
pub use state::StepState;
pub use step::StepRecord;
pub use summary::ProjectSummary;
