//! Project CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, WizardError},
    methodology::Methodology,
    models::{Project, ProjectSummary},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_PROJECT_SQL: &str =
    "INSERT INTO projects (name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (project_id, phase, name, ordinal, human_modified, approved, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?6)";
const SELECT_PROJECT_SQL: &str =
    "SELECT id, name, description, created_at, updated_at FROM projects WHERE id = ?1";
const CHECK_PROJECT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)";
const DELETE_PROJECT_STEPS_SQL: &str = "DELETE FROM steps WHERE project_id = ?1";
const DELETE_PROJECT_SQL: &str = "DELETE FROM projects WHERE id = ?1";
const SELECT_PROJECT_SUMMARIES_SQL: &str = "SELECT p.id, p.name, p.description, p.created_at, p.updated_at, COUNT(s.id), COALESCE(SUM(s.approved), 0) FROM projects p LEFT JOIN steps s ON s.project_id = p.id GROUP BY p.id ORDER BY p.created_at DESC";

impl super::Database {
    /// Creates a new project and seeds one empty step row per methodology
    /// step, all in a single transaction.
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        methodology: &Methodology,
    ) -> Result<Project> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PROJECT_SQL,
            params![name, description, &now_str, &now_str],
        )
        .map_err(|e| WizardError::database("Failed to insert project", e))?;

        let id = tx.last_insert_rowid() as u64;

        for step in methodology.flatten() {
            tx.execute(
                INSERT_STEP_SQL,
                params![
                    id as i64,
                    step.phase,
                    step.name,
                    step.ordinal as i64,
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| WizardError::database("Failed to seed methodology step", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_project(id)?
            .ok_or(WizardError::ProjectNotFound { id })
    }

    /// Retrieves a project by its ID, with steps eagerly loaded.
    pub fn get_project(&self, id: u64) -> Result<Option<Project>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PROJECT_SQL)
            .map_err(|e| WizardError::database("Failed to prepare query", e))?;

        let mut project = stmt
            .query_row(params![id as i64], |row| {
                Ok(Project {
                    id: row.get::<_, i64>(0)? as u64,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    created_at: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
                    })?,
                    updated_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                    })?,
                    steps: Vec::new(),
                })
            })
            .optional()
            .map_err(|e| WizardError::database("Failed to query project", e))?;

        // Eagerly load steps if the project exists
        if let Some(ref mut project) = project {
            project.steps = self.list_steps(project.id)?;
        }

        Ok(project)
    }

    /// Whether a project with the given ID exists.
    pub fn project_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_PROJECT_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check project existence")
    }

    /// Lists all projects as summaries with step counts, newest first.
    pub fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PROJECT_SUMMARIES_SQL)
            .map_err(|e| WizardError::database("Failed to prepare query", e))?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(ProjectSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    created_at: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
                    })?,
                    updated_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                    })?,
                    total_steps: row.get::<_, i64>(5)? as u32,
                    approved_steps: row.get::<_, i64>(6)? as u32,
                })
            })
            .map_err(|e| WizardError::database("Failed to query project summaries", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| WizardError::database("Failed to read project summary row", e))?;

        Ok(summaries)
    }

    /// Deletes a project and all of its steps.
    ///
    /// Returns true when a project row was actually removed.
    pub fn delete_project(&mut self, id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_PROJECT_STEPS_SQL, params![id as i64])
            .map_err(|e| WizardError::database("Failed to delete project steps", e))?;

        let deleted = tx
            .execute(DELETE_PROJECT_SQL, params![id as i64])
            .map_err(|e| WizardError::database("Failed to delete project", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(deleted > 0)
    }
}
