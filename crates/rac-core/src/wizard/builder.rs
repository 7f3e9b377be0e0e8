//! Builder for creating and configuring Wizard instances.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task;

use super::Wizard;
use crate::{
    db::Database,
    error::{Result, WizardError},
    llm::LlmClient,
    methodology::Methodology,
};

/// Builder for creating and configuring Wizard instances.
#[derive(Default)]
pub struct WizardBuilder {
    database_path: Option<PathBuf>,
    methodology: Option<Methodology>,
    llm: Option<Arc<dyn LlmClient>>,
}

impl WizardBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/rac/rac.db` or `~/.local/share/rac/rac.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Substitutes an alternate methodology table.
    pub fn with_methodology(mut self, methodology: Methodology) -> Self {
        self.methodology = Some(methodology);
        self
    }

    /// Attaches an LLM client for step processing.
    ///
    /// Without one, every operation except `process_step` still works.
    pub fn with_llm(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Builds the configured wizard instance.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::FileSystem` if the database path is invalid
    /// Returns `WizardError::Database` if database initialization fails
    pub async fn build(self) -> Result<Wizard> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WizardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), WizardError>(())
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let methodology = Arc::new(self.methodology.unwrap_or_default());
        Ok(Wizard::new(db_path, methodology, self.llm))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("rac")
            .place_data_file("rac.db")
            .map_err(|e| WizardError::XdgDirectory(e.to_string()))
    }
}
