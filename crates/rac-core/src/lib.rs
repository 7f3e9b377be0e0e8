//! Core library for the RaC methodology wizard.
//!
//! This crate provides the business logic for guiding legal or regulatory
//! text through a fixed Rules-as-Code methodology: segmenting source text,
//! extracting rules, detecting conflicts, deriving a data model, and
//! generating executable business rules. Each step is drafted by an LLM,
//! rendered into reviewable text, and gated behind operator approval
//! before its output feeds the next step.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust
//! use rac_core::{WizardBuilder, params::CreateProject};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a wizard instance
//! let wizard = WizardBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Create a new project; its methodology steps are seeded empty
//! let create_params = CreateProject {
//!     name: "Dog Registration Act".to_string(),
//!     description: Some("Pilot project".to_string()),
//! };
//!
//! let project = wizard.create_project(&create_params).await?;
//! println!("Created project: {}", project);
//!
//! // List projects as summaries
//! let projects = wizard.list_projects().await?;
//! for project in &projects {
//!     println!("Project: {}", project.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod db;
pub mod display;
pub mod error;
pub mod llm;
pub mod methodology;
pub mod models;
pub mod normalize;
pub mod params;
pub mod prompts;
pub mod render;
pub mod unwrap;
pub mod wizard;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, OperationStatus, ProjectSummaries, UpdateResult,
};
pub use error::{Result, WizardError};
pub use llm::{LlmClient, OpenRouterClient};
pub use methodology::{Methodology, Phase, StepRef};
pub use models::{Project, ProjectSummary, StepRecord, StepState};
pub use params::{CreateProject, DeleteProject, EditStepOutput, Id, ProcessStep, StepLocator};
pub use render::StepKind;
pub use wizard::{Wizard, WizardBuilder};
