//! Step operations for the Wizard.

use tokio::task;

use super::Wizard;
use crate::{
    chain,
    db::Database,
    error::{Result, WizardError},
    methodology::Methodology,
    models::StepRecord,
    params::{EditStepOutput, StepLocator},
    render::{self, StepKind},
};

/// A step together with the surrounding state the business rules need:
/// its immediate predecessor and the per-ordinal approval map of its
/// project.
pub(crate) struct StepContext {
    pub step: StepRecord,
    pub predecessor: Option<StepRecord>,
    pub approved: Vec<bool>,
}

impl StepContext {
    /// Loads a step and its navigation context from the database.
    pub(crate) fn load(
        db: &Database,
        methodology: &Methodology,
        locator: &StepLocator,
    ) -> Result<Self> {
        let ordinal = methodology
            .ordinal_of(&locator.phase, &locator.name)
            .ok_or_else(|| WizardError::UnknownStep {
                phase: locator.phase.clone(),
                name: locator.name.clone(),
            })?;

        if !db.project_exists(locator.project_id)? {
            return Err(WizardError::ProjectNotFound {
                id: locator.project_id,
            });
        }

        let steps = db.list_steps(locator.project_id)?;

        let mut approved = vec![false; methodology.len()];
        for step in &steps {
            if let Some(slot) = approved.get_mut(step.ordinal as usize) {
                *slot = step.approved;
            }
        }

        let step = steps
            .iter()
            .find(|s| s.phase == locator.phase && s.name == locator.name)
            .cloned()
            .ok_or_else(|| WizardError::StepNotFound {
                project_id: locator.project_id,
                phase: locator.phase.clone(),
                name: locator.name.clone(),
            })?;

        let predecessor = methodology
            .predecessor(ordinal)
            .and_then(|p| steps.into_iter().find(|s| s.ordinal as usize == p.ordinal));

        Ok(Self {
            step,
            predecessor,
            approved,
        })
    }

    /// Whether this step is reachable under its project's approvals.
    pub(crate) fn is_reachable(&self, methodology: &Methodology) -> bool {
        methodology.is_reachable(self.step.ordinal as usize, &self.approved)
    }
}

impl Wizard {
    /// Retrieves a step by its identity triple.
    pub async fn show_step(&self, locator: &StepLocator) -> Result<StepRecord> {
        let ctx = self.load_context(locator).await?;
        Ok(ctx.step)
    }

    /// Resolves the working input for a step: the approved immediate
    /// predecessor's rendered text, the step's own stored input, or the
    /// empty string.
    pub async fn resolve_input(&self, locator: &StepLocator) -> Result<String> {
        let ctx = self.load_context(locator).await?;
        Ok(chain::resolve_initial_input(
            &ctx.step,
            ctx.predecessor.as_ref(),
        ))
    }

    /// Approves a step's rendered output, unlocking the next step.
    ///
    /// A step can only be approved when it is reachable and has non-empty
    /// rendered text to sign off on.
    pub async fn approve_step(&self, locator: &StepLocator) -> Result<StepRecord> {
        let ctx = self.load_context(locator).await?;

        if !ctx.is_reachable(&self.methodology) {
            return Err(WizardError::invalid_input(
                "step",
                "cannot approve a step before its predecessors are approved",
            ));
        }
        let has_output = ctx
            .step
            .rendered_text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !has_output {
            return Err(WizardError::invalid_input(
                "step",
                "cannot approve a step with no output",
            ));
        }

        let db_path = self.db_path.clone();
        let step_id = ctx.step.id;
        let project_id = ctx.step.project_id;
        let locator = locator.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_step_approved(step_id, project_id, true)?;
            db.get_step(project_id, &locator.phase, &locator.name)?
                .ok_or(WizardError::StepNotFound {
                    project_id,
                    phase: locator.phase,
                    name: locator.name,
                })
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Replaces a step's output with operator-supplied text.
    ///
    /// The text becomes the step's rendered output verbatim and the
    /// record is marked as operator-modified. The approval flag is left
    /// as-is: an edit after approval flows straight into the next step
    /// without demanding a second sign-off.
    pub async fn edit_step_output(&self, params: &EditStepOutput) -> Result<StepRecord> {
        if params.text.trim().is_empty() {
            return Err(WizardError::invalid_input("text", "must not be empty"));
        }

        let ctx = self.load_context(&params.locator).await?;

        let db_path = self.db_path.clone();
        let step_id = ctx.step.id;
        let project_id = ctx.step.project_id;
        let locator = params.locator.clone();
        let text = params.text.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.save_step_override(step_id, project_id, &text)?;
            db.get_step(project_id, &locator.phase, &locator.name)?
                .ok_or(WizardError::StepNotFound {
                    project_id,
                    phase: locator.phase,
                    name: locator.name,
                })
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Discards a step's operator override and re-derives the rendered
    /// text from the structured result.
    ///
    /// Rendered text is a pure function of the structured value, so the
    /// reset reproduces the original LLM-derived rendering exactly. A
    /// step with no structured result goes back to empty and loses its
    /// approval.
    pub async fn reset_step_output(&self, locator: &StepLocator) -> Result<StepRecord> {
        let ctx = self.load_context(locator).await?;

        let kind = StepKind::from_name(&ctx.step.name);
        let rendered = ctx
            .step
            .structured_result
            .as_ref()
            .map(|value| render::render(kind, value));

        let db_path = self.db_path.clone();
        let step_id = ctx.step.id;
        let project_id = ctx.step.project_id;
        let locator = locator.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.reset_step_override(step_id, project_id, rendered.as_deref())?;
            db.get_step(project_id, &locator.phase, &locator.name)?
                .ok_or(WizardError::StepNotFound {
                    project_id,
                    phase: locator.phase,
                    name: locator.name,
                })
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Loads a step with its navigation context on the blocking pool.
    pub(crate) async fn load_context(&self, locator: &StepLocator) -> Result<StepContext> {
        let db_path = self.db_path.clone();
        let methodology = self.methodology.clone();
        let locator = locator.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            StepContext::load(&db, &methodology, &locator)
        })
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
