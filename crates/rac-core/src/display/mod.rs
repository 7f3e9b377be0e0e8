//! Display formatting functions and result types.
//!
//! Display implementations for the domain models live here, separated
//! from the model definitions. Collection newtypes and operation result
//! wrappers give every output context (lists, create/update/delete
//! feedback) a consistent markdown rendering.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (ProjectSummaries)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::ProjectSummaries;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
