//! Step query and update operations.
//!
//! Step rows are created when their project is created and never inserted
//! or deleted on their own; everything here reads or updates existing
//! rows addressed by the (project, phase, name) triple.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, WizardError},
    models::StepRecord,
};

// Optimized SQL queries as const strings for compile-time optimization
const SELECT_STEPS_BY_PROJECT_SQL: &str = "SELECT id, project_id, phase, name, ordinal, raw_input, structured_result, human_override, human_modified, rendered_text, confidence, approved, created_at, updated_at FROM steps WHERE project_id = ?1 ORDER BY ordinal";
const SELECT_STEP_SQL: &str = "SELECT id, project_id, phase, name, ordinal, raw_input, structured_result, human_override, human_modified, rendered_text, confidence, approved, created_at, updated_at FROM steps WHERE project_id = ?1 AND phase = ?2 AND name = ?3";
const UPDATE_STEP_DRAFT_SQL: &str = "UPDATE steps SET raw_input = ?1, structured_result = ?2, human_override = NULL, human_modified = 0, rendered_text = ?3, confidence = ?4, approved = 0, updated_at = ?5 WHERE id = ?6";
const UPDATE_STEP_OVERRIDE_SQL: &str = "UPDATE steps SET human_override = ?1, human_modified = 1, rendered_text = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_STEP_APPROVED_SQL: &str =
    "UPDATE steps SET approved = ?1, updated_at = ?2 WHERE id = ?3";
const RESET_STEP_OVERRIDE_SQL: &str = "UPDATE steps SET human_override = NULL, human_modified = 0, rendered_text = ?1, approved = CASE WHEN ?1 IS NULL THEN 0 ELSE approved END, updated_at = ?2 WHERE id = ?3";
const UPDATE_PROJECT_TIMESTAMP_SQL: &str = "UPDATE projects SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a StepRecord from a database row.
    ///
    /// Column order must match the SELECT statements above.
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<StepRecord> {
        let structured_result = Self::parse_json_column(row, 6)?;
        let human_override = Self::parse_json_column(row, 7)?;

        Ok(StepRecord {
            id: row.get::<_, i64>(0)? as u64,
            project_id: row.get::<_, i64>(1)? as u64,
            phase: row.get(2)?,
            name: row.get(3)?,
            ordinal: row.get::<_, i64>(4)? as u32,
            raw_input: row.get(5)?,
            structured_result,
            human_override,
            human_modified: row.get::<_, i64>(8)? != 0,
            rendered_text: row.get(9)?,
            confidence: row.get(10)?,
            approved: row.get::<_, i64>(11)? != 0,
            created_at: row
                .get::<_, String>(12)?
                .parse::<Timestamp>()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e))
                })?,
            updated_at: row
                .get::<_, String>(13)?
                .parse::<Timestamp>()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(13, Type::Text, Box::new(e))
                })?,
        })
    }

    /// Parse an optional JSON text column into a Value.
    fn parse_json_column(
        row: &rusqlite::Row,
        index: usize,
    ) -> rusqlite::Result<Option<serde_json::Value>> {
        let text: Option<String> = row.get(index)?;
        text.map(|t| {
            serde_json::from_str(&t).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        })
        .transpose()
    }

    /// Lists all steps of a project in methodology order.
    pub fn list_steps(&self, project_id: u64) -> Result<Vec<StepRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_BY_PROJECT_SQL)
            .map_err(|e| WizardError::database("Failed to prepare query", e))?;

        let steps = stmt
            .query_map(params![project_id as i64], Self::build_step_from_row)
            .map_err(|e| WizardError::database("Failed to query steps", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| WizardError::database("Failed to read step row", e))?;

        Ok(steps)
    }

    /// Retrieves a step by its identity triple.
    pub fn get_step(&self, project_id: u64, phase: &str, name: &str) -> Result<Option<StepRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEP_SQL)
            .map_err(|e| WizardError::database("Failed to prepare query", e))?;

        stmt.query_row(
            params![project_id as i64, phase, name],
            Self::build_step_from_row,
        )
        .optional()
        .map_err(|e| WizardError::database("Failed to query step", e))
    }

    /// Stores a fresh draft result for a step.
    ///
    /// Replaces the raw input, structured result, rendered text and
    /// confidence, clears any operator override, and revokes approval:
    /// new output always requires a new sign-off.
    pub fn save_step_draft(
        &mut self,
        step_id: u64,
        project_id: u64,
        raw_input: &str,
        structured_result: &serde_json::Value,
        rendered_text: &str,
        confidence: Option<f64>,
    ) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let result_json = structured_result.to_string();

        tx.execute(
            UPDATE_STEP_DRAFT_SQL,
            params![
                raw_input,
                result_json,
                rendered_text,
                confidence,
                &now_str,
                step_id as i64
            ],
        )
        .map_err(|e| WizardError::database("Failed to save step draft", e))?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, project_id as i64],
        )
        .map_err(|e| WizardError::database("Failed to update project timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Replaces a step's output with operator-supplied text.
    ///
    /// The override is stored as a `{"text": ...}` value and the rendered
    /// text becomes the operator's text verbatim. The approved flag is
    /// left untouched so a post-approval edit flows straight into the
    /// next step.
    pub fn save_step_override(&mut self, step_id: u64, project_id: u64, text: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let override_json = serde_json::json!({ "text": text }).to_string();

        tx.execute(
            UPDATE_STEP_OVERRIDE_SQL,
            params![override_json, text, &now_str, step_id as i64],
        )
        .map_err(|e| WizardError::database("Failed to save step override", e))?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, project_id as i64],
        )
        .map_err(|e| WizardError::database("Failed to update project timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Sets a step's approved flag.
    pub fn set_step_approved(&mut self, step_id: u64, project_id: u64, approved: bool) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_STEP_APPROVED_SQL,
            params![approved as i64, &now_str, step_id as i64],
        )
        .map_err(|e| WizardError::database("Failed to update step approval", e))?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, project_id as i64],
        )
        .map_err(|e| WizardError::database("Failed to update project timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Discards a step's operator override, restoring the given rendering
    /// derived from the structured result.
    ///
    /// When the step has no structured result to re-render from (pass
    /// `None`), the rendered text is cleared and approval is revoked.
    pub fn reset_step_override(
        &mut self,
        step_id: u64,
        project_id: u64,
        rendered_text: Option<&str>,
    ) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();

        tx.execute(
            RESET_STEP_OVERRIDE_SQL,
            params![rendered_text, &now_str, step_id as i64],
        )
        .map_err(|e| WizardError::database("Failed to reset step override", e))?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, project_id as i64],
        )
        .map_err(|e| WizardError::database("Failed to update project timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
