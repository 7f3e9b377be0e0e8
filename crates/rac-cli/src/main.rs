//! rac CLI Application
//!
//! Command-line interface for the Rules-as-Code methodology wizard.

mod args;
mod cli;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use rac_core::{OpenRouterClient, WizardBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let mut builder = WizardBuilder::new().with_database_path(database_file);
    match OpenRouterClient::from_env() {
        Ok(client) => builder = builder.with_llm(Arc::new(client)),
        Err(e) => info!("running without LLM client: {e}"),
    }

    let wizard = builder.build().await.context("Failed to initialize wizard")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("rac started");

    match command {
        Some(Project { command }) => {
            Cli::new(wizard, renderer)
                .handle_project_command(command)
                .await
        }
        Some(Step { command }) => {
            Cli::new(wizard, renderer)
                .handle_step_command(command)
                .await
        }
        None => Cli::new(wizard, renderer).list_projects().await,
    }
}
