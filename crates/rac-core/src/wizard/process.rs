//! LLM-backed step processing.

use tokio::task;

use super::Wizard;
use crate::{
    db::Database,
    error::{Result, WizardError},
    llm::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE},
    models::StepRecord,
    normalize, prompts,
    params::ProcessStep,
    render::{self, StepKind},
};

impl Wizard {
    /// Runs a step through the LLM and stores the draft result.
    ///
    /// The input is the explicit text when provided, otherwise it is
    /// resolved from the approved predecessor or the step's stored raw
    /// input. The response is normalized into JSON, rendered into
    /// operator-facing text, and saved with approval revoked. Any
    /// existing operator override is cleared by the new draft.
    pub async fn process_step(&self, params: &ProcessStep) -> Result<StepRecord> {
        let llm = self.llm.clone().ok_or_else(|| WizardError::Configuration {
            message: "no LLM client configured; set OPENROUTER_API_KEY and RAC_LLM_MODEL"
                .to_string(),
        })?;

        let ctx = self.load_context(&params.locator).await?;
        if !ctx.is_reachable(&self.methodology) {
            return Err(WizardError::invalid_input(
                "step",
                "cannot process a step before its predecessors are approved",
            ));
        }

        let input = match &params.input {
            Some(text) if !text.trim().is_empty() => text.clone(),
            _ => crate::chain::resolve_initial_input(&ctx.step, ctx.predecessor.as_ref()),
        };
        if input.trim().is_empty() {
            return Err(WizardError::invalid_input(
                "input",
                "no input available; provide text or approve the previous step",
            ));
        }

        let kind = StepKind::from_name(&ctx.step.name).ok_or_else(|| WizardError::UnknownStep {
            phase: ctx.step.phase.clone(),
            name: ctx.step.name.clone(),
        })?;

        let prompt = prompts::prompt_for(kind, &input);
        log::info!(
            "processing step '{}/{}' for project {}",
            ctx.step.phase,
            ctx.step.name,
            ctx.step.project_id
        );
        let response = llm
            .complete(&prompt, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE)
            .await?;

        let envelope = normalize::normalize(&response)?;
        let confidence = envelope.get("confidence").and_then(|c| c.as_f64());
        let result = envelope.get("result").cloned().unwrap_or(envelope);
        let rendered = render::render(Some(kind), &result);

        let db_path = self.db_path.clone();
        let step_id = ctx.step.id;
        let project_id = ctx.step.project_id;
        let locator = params.locator.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.save_step_draft(step_id, project_id, &input, &result, &rendered, confidence)?;
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
}
