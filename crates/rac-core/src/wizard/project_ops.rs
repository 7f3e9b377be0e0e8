//! Project operations for the Wizard.

use tokio::task;

use super::Wizard;
use crate::{
    db::Database,
    display::ProjectSummaries,
    error::{Result, WizardError},
    models::Project,
    params::{CreateProject, DeleteProject, Id},
};

impl Wizard {
    /// Creates a new project seeded with one empty record per methodology
    /// step.
    pub async fn create_project(&self, params: &CreateProject) -> Result<Project> {
        if params.name.trim().is_empty() {
            return Err(WizardError::invalid_input("name", "must not be empty"));
        }

        let db_path = self.db_path.clone();
        let methodology = self.methodology.clone();
        let name = params.name.clone();
        let description = params.description.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_project(&name, description.as_deref(), &methodology)
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a project by its ID, with steps eagerly loaded.
    pub async fn get_project(&self, params: &Id) -> Result<Option<Project>> {
        let db_path = self.db_path.clone();
        let project_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_project(project_id)
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists all projects as summaries with approval counts.
    pub async fn list_projects(&self) -> Result<ProjectSummaries> {
        let db_path = self.db_path.clone();

        let summaries = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_projects()
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(ProjectSummaries(summaries))
    }

    /// Permanently deletes a project and all its associated steps.
    /// This operation cannot be undone, so it requires confirmation.
    pub async fn delete_project(&self, params: &DeleteProject) -> Result<()> {
        if !params.confirmed {
            return Err(WizardError::invalid_input(
                "confirmed",
                "deletion must be confirmed",
            ));
        }

        let db_path = self.db_path.clone();
        let project_id = params.id;

        let deleted = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_project(project_id)
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        if !deleted {
            return Err(WizardError::ProjectNotFound { id: project_id });
        }
        Ok(())
    }
}
