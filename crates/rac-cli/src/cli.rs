//! Command dispatch and output formatting.
//!
//! Bridges parsed arguments to wizard operations and renders the results
//! through the terminal renderer. All user-facing output flows through
//! the core display wrappers so the CLI stays a thin shell.

use anyhow::{Context, Result};
use rac_core::{
    params::Id, CreateResult, DeleteResult, OperationStatus, UpdateResult, Wizard,
};

use crate::args::{ProjectCommands, StepCommands};
use crate::renderer::TerminalRenderer;

/// CLI command handler holding the wizard and the renderer.
pub struct Cli {
    wizard: Wizard,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI handler.
    pub fn new(wizard: Wizard, renderer: TerminalRenderer) -> Self {
        Self { wizard, renderer }
    }

    /// Dispatch a project subcommand.
    pub async fn handle_project_command(self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Create(args) => {
                let project = self
                    .wizard
                    .create_project(&args.into())
                    .await
                    .context("Failed to create project")?;
                self.renderer
                    .render(&CreateResult::new(project).to_string())
            }
            ProjectCommands::List => self.list_projects().await,
            ProjectCommands::Show(args) => {
                let params: Id = args.into();
                let project = self
                    .wizard
                    .get_project(&params)
                    .await
                    .context("Failed to load project")?;
                match project {
                    Some(project) => self.renderer.render(&project.to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!("Project {} not found", params.id))
                            .to_string(),
                    ),
                }
            }
            ProjectCommands::Delete(args) => {
                let params = args.into();
                self.wizard
                    .delete_project(&params)
                    .await
                    .context("Failed to delete project")?;
                self.renderer
                    .render(&DeleteResult::new("project", params.id).to_string())
            }
        }
    }

    /// Dispatch a step subcommand.
    pub async fn handle_step_command(self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Show(args) => {
                let step = self
                    .wizard
                    .show_step(&args.into())
                    .await
                    .context("Failed to load step")?;
                self.renderer.render(&step.to_string())
            }
            StepCommands::Input(args) => {
                let input = self
                    .wizard
                    .resolve_input(&args.into())
                    .await
                    .context("Failed to resolve step input")?;
                if input.is_empty() {
                    self.renderer.render(
                        &OperationStatus::failure(
                            "No input available; provide text or approve the previous step"
                                .to_string(),
                        )
                        .to_string(),
                    )
                } else {
                    self.renderer.render(&input)
                }
            }
            StepCommands::Process(args) => {
                let step = self
                    .wizard
                    .process_step(&args.into())
                    .await
                    .context("Failed to process step")?;
                self.renderer.render(
                    &UpdateResult::with_changes(step, vec!["Drafted new output".to_string()])
                        .to_string(),
                )
            }
            StepCommands::Edit(args) => {
                let step = self
                    .wizard
                    .edit_step_output(&args.into())
                    .await
                    .context("Failed to edit step output")?;
                self.renderer.render(
                    &UpdateResult::with_changes(step, vec!["Replaced output".to_string()])
                        .to_string(),
                )
            }
            StepCommands::Approve(args) => {
                let step = self
                    .wizard
                    .approve_step(&args.into())
                    .await
                    .context("Failed to approve step")?;
                self.renderer.render(
                    &UpdateResult::with_changes(step, vec!["Approved output".to_string()])
                        .to_string(),
                )
            }
            StepCommands::Reset(args) => {
                let step = self
                    .wizard
                    .reset_step_output(&args.into())
                    .await
                    .context("Failed to reset step output")?;
                self.renderer.render(
                    &UpdateResult::with_changes(step, vec!["Restored generated output".to_string()])
                        .to_string(),
                )
            }
        }
    }

    /// List all projects as summaries.
    pub async fn list_projects(&self) -> Result<()> {
        let summaries = self
            .wizard
            .list_projects()
            .await
            .context("Failed to list projects")?;
        self.renderer.render(&summaries.to_string())
    }
}
