//! Tests for the wizard module.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use super::*;
use crate::{
    error::{Result, WizardError},
    llm::LlmClient,
    models::StepState,
    params::{CreateProject, DeleteProject, EditStepOutput, Id, ProcessStep, StepLocator},
};

/// LLM stand-in that replays a fixed queue of responses.
struct ScriptedLlm {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedLlm {
    fn new(responses: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
        })
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, _prompt: &str, _max_tokens: u32, _temperature: f64) -> Result<String> {
        self.responses
            .lock()
            .expect("scripted responses poisoned")
            .pop_front()
            .ok_or_else(|| WizardError::Configuration {
                message: "scripted responses exhausted".to_string(),
            })
    }
}

/// Helper function to create a test wizard
async fn create_test_wizard(llm: Option<Arc<dyn LlmClient>>) -> (TempDir, Wizard) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let mut builder = WizardBuilder::new().with_database_path(Some(&db_path));
    if let Some(llm) = llm {
        builder = builder.with_llm(llm);
    }
    let wizard = builder.build().await.expect("Failed to create wizard");
    (temp_dir, wizard)
}

fn locator(project_id: u64, phase: &str, name: &str) -> StepLocator {
    StepLocator {
        project_id,
        phase: phase.to_string(),
        name: name.to_string(),
    }
}

const SEGMENT_RESPONSE: &str = r#"{"result": {"sections": [{"id": "s1", "title": "Scope", "content": "All dogs must be registered.", "referenceId": "art. 1"}]}, "confidence": 0.92}"#;

#[tokio::test]
async fn test_create_project_seeds_all_steps() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "Dog Registration Act".to_string(),
            description: Some("Pilot".to_string()),
        })
        .await
        .expect("Failed to create project");

    assert_eq!(project.steps.len(), 5);
    assert_eq!(project.steps[0].phase, "Preparation");
    assert_eq!(project.steps[0].name, "Segment Text");
    assert_eq!(project.steps[4].name, "Generate Business Rules");
    for (i, step) in project.steps.iter().enumerate() {
        assert_eq!(step.ordinal as usize, i);
        assert_eq!(step.state(), StepState::Empty);
    }
}

#[tokio::test]
async fn test_create_project_rejects_empty_name() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let result = wizard
        .create_project(&CreateProject {
            name: "   ".to_string(),
            description: None,
        })
        .await;
    assert!(matches!(result, Err(WizardError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_list_projects_counts_approvals() {
    let (_temp_dir, wizard) = create_test_wizard(Some(ScriptedLlm::new(vec![SEGMENT_RESPONSE]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "Listing".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let loc = locator(project.id, "Preparation", "Segment Text");
    wizard
        .process_step(&ProcessStep {
            locator: loc.clone(),
            input: Some("All dogs must be registered.".to_string()),
        })
        .await
        .expect("Failed to process step");
    wizard.approve_step(&loc).await.expect("Failed to approve");

    let summaries = wizard.list_projects().await.expect("Failed to list");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_steps, 5);
    assert_eq!(summaries[0].approved_steps, 1);
}

#[tokio::test]
async fn test_delete_project_requires_confirmation() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "Doomed".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let unconfirmed = wizard
        .delete_project(&DeleteProject {
            id: project.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(unconfirmed, Err(WizardError::InvalidInput { .. })));

    wizard
        .delete_project(&DeleteProject {
            id: project.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete project");

    let gone = wizard.get_project(&Id { id: project.id }).await.unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_delete_missing_project_reports_not_found() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let result = wizard
        .delete_project(&DeleteProject {
            id: 999,
            confirmed: true,
        })
        .await;
    assert!(matches!(
        result,
        Err(WizardError::ProjectNotFound { id: 999 })
    ));
}

#[tokio::test]
async fn test_show_step_rejects_unknown_identity() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let result = wizard
        .show_step(&locator(project.id, "Preparation", "Nonexistent"))
        .await;
    assert!(matches!(result, Err(WizardError::UnknownStep { .. })));
}

#[tokio::test]
async fn test_process_step_without_llm_fails() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let result = wizard
        .process_step(&ProcessStep {
            locator: locator(project.id, "Preparation", "Segment Text"),
            input: Some("text".to_string()),
        })
        .await;
    assert!(matches!(result, Err(WizardError::Configuration { .. })));
}

#[tokio::test]
async fn test_process_step_stores_draft() {
    let (_temp_dir, wizard) = create_test_wizard(Some(ScriptedLlm::new(vec![SEGMENT_RESPONSE]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let step = wizard
        .process_step(&ProcessStep {
            locator: locator(project.id, "Preparation", "Segment Text"),
            input: Some("All dogs must be registered.".to_string()),
        })
        .await
        .expect("Failed to process step");

    assert_eq!(step.state(), StepState::Drafted);
    assert!(!step.approved);
    assert_eq!(step.raw_input.as_deref(), Some("All dogs must be registered."));
    assert_eq!(step.confidence, Some(0.92));
    let rendered = step.rendered_text.expect("draft should have rendered text");
    assert!(rendered.contains("ID: s1"));
    assert!(rendered.contains("Reference ID: art. 1"));
}

#[tokio::test]
async fn test_process_step_handles_fenced_response() {
    let fenced = format!("```json\n{SEGMENT_RESPONSE}\n```");
    let (_temp_dir, wizard) = create_test_wizard(Some(ScriptedLlm::new(vec![fenced.as_str()]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let step = wizard
        .process_step(&ProcessStep {
            locator: locator(project.id, "Preparation", "Segment Text"),
            input: Some("All dogs must be registered.".to_string()),
        })
        .await
        .expect("Failed to process fenced response");
    assert_eq!(step.confidence, Some(0.92));
}

#[tokio::test]
async fn test_process_step_rejects_malformed_response() {
    let (_temp_dir, wizard) =
        create_test_wizard(Some(ScriptedLlm::new(vec!["this is not json at all"]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let result = wizard
        .process_step(&ProcessStep {
            locator: locator(project.id, "Preparation", "Segment Text"),
            input: Some("text".to_string()),
        })
        .await;
    assert!(matches!(result, Err(WizardError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_process_unreachable_step_is_rejected() {
    let (_temp_dir, wizard) = create_test_wizard(Some(ScriptedLlm::new(vec![SEGMENT_RESPONSE]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    // Nothing approved yet: ordinal 1 is out of reach.
    let result = wizard
        .process_step(&ProcessStep {
            locator: locator(project.id, "Preparation", "Extract Rules"),
            input: Some("text".to_string()),
        })
        .await;
    assert!(matches!(result, Err(WizardError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_approve_requires_output() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let result = wizard
        .approve_step(&locator(project.id, "Preparation", "Segment Text"))
        .await;
    assert!(matches!(result, Err(WizardError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_approved_output_feeds_next_step() {
    let (_temp_dir, wizard) = create_test_wizard(Some(ScriptedLlm::new(vec![SEGMENT_RESPONSE]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let first = locator(project.id, "Preparation", "Segment Text");
    let second = locator(project.id, "Preparation", "Extract Rules");

    wizard
        .process_step(&ProcessStep {
            locator: first.clone(),
            input: Some("All dogs must be registered.".to_string()),
        })
        .await
        .expect("Failed to process step");

    // Before approval the draft must not leak forward.
    assert_eq!(wizard.resolve_input(&second).await.unwrap(), "");

    let approved = wizard.approve_step(&first).await.expect("Failed to approve");
    assert_eq!(approved.state(), StepState::Approved);

    let chained = wizard.resolve_input(&second).await.unwrap();
    assert_eq!(chained, approved.rendered_text.unwrap());
}

#[tokio::test]
async fn test_edit_and_reset_step_output() {
    let (_temp_dir, wizard) = create_test_wizard(Some(ScriptedLlm::new(vec![SEGMENT_RESPONSE]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let loc = locator(project.id, "Preparation", "Segment Text");
    let drafted = wizard
        .process_step(&ProcessStep {
            locator: loc.clone(),
            input: Some("All dogs must be registered.".to_string()),
        })
        .await
        .expect("Failed to process step");
    let original_rendering = drafted.rendered_text.clone().expect("draft has rendering");

    let edited = wizard
        .edit_step_output(&EditStepOutput {
            locator: loc.clone(),
            text: "Operator-corrected sections.".to_string(),
        })
        .await
        .expect("Failed to edit output");
    assert!(edited.human_modified);
    assert_eq!(
        edited.rendered_text.as_deref(),
        Some("Operator-corrected sections.")
    );

    // Reset reproduces the original LLM-derived rendering exactly.
    let reset = wizard
        .reset_step_output(&loc)
        .await
        .expect("Failed to reset output");
    assert_eq!(reset.state(), StepState::Drafted);
    assert!(!reset.human_modified);
    assert!(reset.human_override.is_none());
    assert_eq!(reset.rendered_text, Some(original_rendering));
    assert_eq!(reset.raw_input.as_deref(), Some("All dogs must be registered."));
}

#[tokio::test]
async fn test_reset_of_empty_step_clears_output() {
    let (_temp_dir, wizard) = create_test_wizard(None).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let loc = locator(project.id, "Preparation", "Segment Text");
    wizard
        .edit_step_output(&EditStepOutput {
            locator: loc.clone(),
            text: "Hand-written.".to_string(),
        })
        .await
        .expect("Failed to edit output");

    // No structured result to fall back to: the step goes back to empty.
    let reset = wizard
        .reset_step_output(&loc)
        .await
        .expect("Failed to reset output");
    assert_eq!(reset.state(), StepState::Empty);
    assert!(reset.rendered_text.is_none());
}

#[tokio::test]
async fn test_edit_after_approval_flows_forward() {
    let (_temp_dir, wizard) = create_test_wizard(Some(ScriptedLlm::new(vec![SEGMENT_RESPONSE]))).await;

    let project = wizard
        .create_project(&CreateProject {
            name: "P".to_string(),
            description: None,
        })
        .await
        .expect("Failed to create project");

    let first = locator(project.id, "Preparation", "Segment Text");
    let second = locator(project.id, "Preparation", "Extract Rules");

    wizard
        .process_step(&ProcessStep {
            locator: first.clone(),
            input: Some("All dogs must be registered.".to_string()),
        })
        .await
        .expect("Failed to process step");
    wizard.approve_step(&first).await.expect("Failed to approve");

    let edited = wizard
        .edit_step_output(&EditStepOutput {
            locator: first,
            text: "Amended text.".to_string(),
        })
        .await
        .expect("Failed to edit output");
    assert!(edited.approved, "edit must not revoke approval");

    assert_eq!(wizard.resolve_input(&second).await.unwrap(), "Amended text.");
}
