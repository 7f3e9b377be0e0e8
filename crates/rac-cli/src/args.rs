//! Command-line argument definitions using clap.
//!
//! Implements the parameter wrapper pattern: each command gets a
//! clap-specific argument struct that converts into the core parameter
//! type via `From`, keeping the core free of CLI framework concerns.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use rac_core::params::{
    CreateProject, DeleteProject, EditStepOutput, Id, ProcessStep, StepLocator,
};

/// Main command-line interface for the RaC methodology wizard
///
/// rac guides legal or regulatory text through a fixed Rules-as-Code
/// methodology: segmenting text, extracting rules, detecting conflicts,
/// deriving a data model, and generating business rules. Each step is
/// drafted by an LLM and gated behind operator approval before its output
/// feeds the next step.
#[derive(Parser)]
#[command(version, about, name = "rac")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/rac/rac.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the rac CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Work through methodology steps
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// List all projects
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific project
    #[command(alias = "s")]
    Show(ShowProjectArgs),
    /// Delete a project permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteProjectArgs),
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Show details of a specific step
    #[command(alias = "s")]
    Show(StepLocatorArgs),
    /// Show the input a step would receive
    #[command(alias = "i")]
    Input(StepLocatorArgs),
    /// Run a step through the LLM and store the draft
    #[command(alias = "p")]
    Process(ProcessStepArgs),
    /// Replace a step's output with your own text
    #[command(alias = "e")]
    Edit(EditStepArgs),
    /// Approve a step's output, unlocking the next step
    #[command(alias = "a")]
    Approve(StepLocatorArgs),
    /// Discard manual edits and restore the generated output
    #[command(alias = "r")]
    Reset(StepLocatorArgs),
}

/// Create a new project
#[derive(ClapArgs)]
pub struct CreateProjectArgs {
    /// Name of the project
    pub name: String,
    /// Optional description providing more context about the project
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(val: CreateProjectArgs) -> Self {
        CreateProject {
            name: val.name,
            description: val.description,
        }
    }
}

/// Show details of a specific project
#[derive(ClapArgs)]
pub struct ShowProjectArgs {
    /// ID of the project to display
    pub id: u64,
}

impl From<ShowProjectArgs> for Id {
    fn from(val: ShowProjectArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a project permanently
#[derive(ClapArgs)]
pub struct DeleteProjectArgs {
    /// ID of the project to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteProjectArgs> for DeleteProject {
    fn from(val: DeleteProjectArgs) -> Self {
        DeleteProject {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Identify a step by project, phase and name
#[derive(ClapArgs)]
pub struct StepLocatorArgs {
    /// ID of the owning project
    pub project_id: u64,
    /// Phase the step belongs to (e.g. "Preparation")
    pub phase: String,
    /// Name of the step (e.g. "Segment Text")
    pub name: String,
}

impl From<StepLocatorArgs> for StepLocator {
    fn from(val: StepLocatorArgs) -> Self {
        StepLocator {
            project_id: val.project_id,
            phase: val.phase,
            name: val.name,
        }
    }
}

/// Run a step through the LLM
#[derive(ClapArgs)]
pub struct ProcessStepArgs {
    #[command(flatten)]
    pub locator: StepLocatorArgs,
    /// Explicit input text; defaults to the approved predecessor's output
    /// or the step's stored input
    #[arg(short, long)]
    pub input: Option<String>,
}

impl From<ProcessStepArgs> for ProcessStep {
    fn from(val: ProcessStepArgs) -> Self {
        ProcessStep {
            locator: val.locator.into(),
            input: val.input,
        }
    }
}

/// Replace a step's output with operator text
#[derive(ClapArgs)]
pub struct EditStepArgs {
    #[command(flatten)]
    pub locator: StepLocatorArgs,
    /// Replacement text for the step's output
    pub text: String,
}

impl From<EditStepArgs> for EditStepOutput {
    fn from(val: EditStepArgs) -> Self {
        EditStepOutput {
            locator: val.locator.into(),
            text: val.text,
        }
    }
}
