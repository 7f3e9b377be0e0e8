//! Error types for the wizard library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all wizard operations.
#[derive(Error, Debug)]
pub enum WizardError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Project not found for the given ID
    #[error("Project with ID {id} not found")]
    ProjectNotFound { id: u64 },
    /// Step not found for the given identity triple
    #[error("Step '{phase}/{name}' not found for project {project_id}")]
    StepNotFound {
        project_id: u64,
        phase: String,
        name: String,
    },
    /// Step identity does not exist in the configured methodology
    #[error("Step '{phase}/{name}' is not part of the methodology")]
    UnknownStep { phase: String, name: String },
    /// Non-2xx response from the LLM provider
    #[error("LLM provider error (HTTP {status}): {message}")]
    UpstreamLlm { status: u16, message: String },
    /// Network-level failure reaching the LLM provider
    #[error("LLM transport error: {source}")]
    LlmTransport {
        #[from]
        source: reqwest::Error,
    },
    /// All repair strategies failed to recover JSON from a response
    #[error("Invalid response format from LLM: {snippet}")]
    MalformedResponse { snippet: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl WizardError {
    /// Creates a new database error with additional context.
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed-response error, keeping only the first 1000
    /// characters of the offending text so logs stay bounded.
    pub fn malformed_response(raw: &str) -> Self {
        Self::MalformedResponse {
            snippet: raw.chars().take(1000).collect(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WizardError::database(message, e))
    }
}

/// Result type alias for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;
