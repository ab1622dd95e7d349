//! Configurator CLI
//!
//! Imports configurator definitions, runs the wizard on the terminal and
//! gives the back office a view of incoming submissions.

mod args;
mod cli;
mod renderer;
mod wizard;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use configurator_core::ConfiguratorServiceBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        webhook_url,
        webhook_timeout,
        locale,
        command,
    } = Args::parse();

    let service = ConfiguratorServiceBuilder::new()
        .with_database_path(database_file)
        .with_webhook_url(webhook_url)
        .with_webhook_timeout(Duration::from_secs(webhook_timeout))
        .with_locale(locale)
        .build()
        .await
        .context("Failed to initialize configurator service")?;

    info!("Using database {}", service.database_path().display());

    let cli = Cli::new(service, TerminalRenderer::new(!no_color));
    match command {
        Some(Schema { command }) => cli.handle_schema_command(command).await,
        Some(Wizard(args)) => cli.run_wizard(args).await,
        Some(Submission { command }) => cli.handle_submission_command(command).await,
        None => cli.list_configurators().await,
    }
}
