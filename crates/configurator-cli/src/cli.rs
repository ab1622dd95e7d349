//! Command-line argument wrappers and the command handler.
//!
//! Argument structs carry the clap derives and convert into the plain core
//! parameter types, so core stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ConfiguratorService
//! ```

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use configurator_core::{
    display::{
        ConfiguratorSummaries, DeleteResult, ImportResult, SchemaDetails, StatusChange,
        SubmissionDetails, Submissions,
    },
    params::*,
    ConfiguratorDefinition, ConfiguratorError, ConfiguratorService, SubmissionStatus,
};
use log::debug;

use crate::{
    renderer::TerminalRenderer,
    wizard::{run_interactive, run_scripted, ScriptedRun},
};

// ============================================================================
// CLI Argument Wrappers
// ============================================================================

/// Import a configurator definition from a JSON file
#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "Path to the JSON definition file")]
    pub file: PathBuf,
    /// Replace an existing configurator with the same slug
    #[arg(long, help = "Replace the configurator with the same slug, keeping its ID")]
    pub replace: bool,
}

/// Identifies a configurator by ID or slug
#[derive(Args)]
pub struct ConfiguratorKeyArgs {
    #[arg(help = "Numeric ID or slug of the configurator")]
    pub key: String,
}

impl From<ConfiguratorKeyArgs> for ConfiguratorKey {
    fn from(val: ConfiguratorKeyArgs) -> Self {
        ConfiguratorKey::new(val.key)
    }
}

#[derive(Subcommand)]
pub enum SchemaCommands {
    /// Import a configurator definition from a JSON file
    #[command(alias = "i")]
    Import(ImportArgs),
    /// List configurators
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a configurator with its steps and options
    #[command(alias = "s")]
    Show(ConfiguratorKeyArgs),
    /// Delete a configurator; its submissions are kept
    #[command(aliases = ["d", "rm"])]
    Delete(ConfiguratorKeyArgs),
    /// Print the JSON Schema of the definition file format
    JsonSchema,
}

/// Run a configurator wizard
///
/// Without `--answers` the wizard asks each question on the terminal. Type
/// `:back` to return to the previous question. With `--answers` the answers,
/// contact details and appointment are read from a JSON file and submitted
/// without prompting.
#[derive(Args)]
pub struct WizardArgs {
    #[arg(help = "Numeric ID or slug of the configurator")]
    pub key: String,
    #[arg(long, help = "JSON file with answers, contact and appointment")]
    pub answers: Option<PathBuf>,
}

/// List submissions
#[derive(Args)]
pub struct ListSubmissionsArgs {
    #[arg(short, long, help = "Only submissions with this status")]
    pub status: Option<SubmissionStatusArg>,
    #[arg(short, long, help = "Only submissions of this configurator (ID or slug)")]
    pub configurator: Option<String>,
}

impl From<ListSubmissionsArgs> for ListSubmissions {
    fn from(val: ListSubmissionsArgs) -> Self {
        ListSubmissions {
            status: val.status.map(Into::into),
            configurator: val.configurator.map(ConfiguratorKey::new),
        }
    }
}

/// Show a submission
#[derive(Args)]
pub struct ShowSubmissionArgs {
    #[arg(help = "Unique identifier of the submission")]
    pub id: u64,
}

impl From<ShowSubmissionArgs> for Id {
    fn from(val: ShowSubmissionArgs) -> Self {
        Id { id: val.id }
    }
}

/// Move a submission to another back-office status
#[derive(Args)]
pub struct UpdateStatusArgs {
    #[arg(help = "Unique identifier of the submission")]
    pub id: u64,
    #[arg(help = "New status (new, contacted, quoted, closed)")]
    pub status: SubmissionStatusArg,
}

impl From<UpdateStatusArgs> for UpdateSubmissionStatus {
    fn from(val: UpdateStatusArgs) -> Self {
        UpdateSubmissionStatus {
            id: val.id,
            status: val.status.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum SubmissionCommands {
    /// List submissions, newest first
    #[command(aliases = ["l", "ls"])]
    List(ListSubmissionsArgs),
    /// Show a submission with labelled answers
    #[command(alias = "s")]
    Show(ShowSubmissionArgs),
    /// Change the back-office status of a submission
    #[command(alias = "st")]
    Status(UpdateStatusArgs),
}

/// Command-line representation of submission statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SubmissionStatusArg {
    New,
    Contacted,
    Quoted,
    Closed,
}

impl From<SubmissionStatusArg> for SubmissionStatus {
    fn from(val: SubmissionStatusArg) -> Self {
        match val {
            SubmissionStatusArg::New => SubmissionStatus::New,
            SubmissionStatusArg::Contacted => SubmissionStatus::Contacted,
            SubmissionStatusArg::Quoted => SubmissionStatus::Quoted,
            SubmissionStatusArg::Closed => SubmissionStatus::Closed,
        }
    }
}

// ============================================================================
// Command Handler
// ============================================================================

/// Runs parsed commands against the service and renders the results.
pub struct Cli {
    service: ConfiguratorService,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(service: ConfiguratorService, renderer: TerminalRenderer) -> Self {
        Self { service, renderer }
    }

    pub async fn handle_schema_command(&self, command: SchemaCommands) -> Result<()> {
        match command {
            SchemaCommands::Import(args) => self.import_configurator(args).await,
            SchemaCommands::List => self.list_configurators().await,
            SchemaCommands::Show(args) => self.show_configurator(&args.into()).await,
            SchemaCommands::Delete(args) => self.delete_configurator(&args.into()).await,
            SchemaCommands::JsonSchema => self.print_json_schema(),
        }
    }

    pub async fn handle_submission_command(&self, command: SubmissionCommands) -> Result<()> {
        match command {
            SubmissionCommands::List(args) => self.list_submissions(&args.into()).await,
            SubmissionCommands::Show(args) => self.show_submission(&args.into()).await,
            SubmissionCommands::Status(args) => self.update_submission_status(&args.into()).await,
        }
    }

    pub async fn list_configurators(&self) -> Result<()> {
        let summaries = self
            .service
            .list_configurators()
            .await
            .context("Failed to list configurators")?;
        self.renderer
            .render(&ConfiguratorSummaries(summaries).to_string())
    }

    async fn import_configurator(&self, args: ImportArgs) -> Result<()> {
        let content = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let definition: ConfiguratorDefinition = serde_json::from_str(&content)
            .with_context(|| format!("Invalid definition file {}", args.file.display()))?;
        debug!(
            "Importing '{}' with {} steps",
            definition.slug,
            definition.steps.len()
        );
        let replaced = args.replace
            && self
                .service
                .find_configurator(&ConfiguratorKey::new(definition.slug.as_str()))
                .await
                .is_ok();

        let schema = self
            .service
            .import_configurator(&ImportConfigurator {
                definition,
                replace: args.replace,
            })
            .await
            .context("Failed to import configurator")?;
        self.renderer.render(
            &ImportResult { schema, replaced }
            .to_string(),
        )
    }

    async fn show_configurator(&self, key: &ConfiguratorKey) -> Result<()> {
        let schema = self.service.find_configurator(key).await?;
        self.renderer
            .render(&SchemaDetails::new(&schema, self.service.locale()).to_string())
    }

    async fn delete_configurator(&self, key: &ConfiguratorKey) -> Result<()> {
        let schema = self.service.delete_configurator(key).await?;
        self.renderer
            .render(&DeleteResult::new(schema).to_string())
    }

    fn print_json_schema(&self) -> Result<()> {
        let schema = schemars::schema_for!(ConfiguratorDefinition);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    async fn list_submissions(&self, params: &ListSubmissions) -> Result<()> {
        let submissions = self
            .service
            .list_submissions(params)
            .await
            .context("Failed to list submissions")?;
        self.renderer
            .render(&Submissions(submissions).to_string())
    }

    async fn show_submission(&self, params: &Id) -> Result<()> {
        let submission = self
            .service
            .get_submission(params)
            .await?
            .ok_or(ConfiguratorError::SubmissionNotFound { id: params.id })?;
        // Labels are resolved when the configurator still exists
        let schema = self
            .service
            .get_configurator(&Id {
                id: submission.configurator_id,
            })
            .await?;
        self.renderer
            .render(&SubmissionDetails::new(&submission, schema.as_ref()).to_string())
    }

    async fn update_submission_status(&self, params: &UpdateSubmissionStatus) -> Result<()> {
        let submission = self.service.update_submission_status(params).await?;
        self.renderer
            .render(&StatusChange { submission }.to_string())
    }

    pub async fn run_wizard(&self, args: WizardArgs) -> Result<()> {
        let key = ConfiguratorKey::new(args.key);
        let session = self.service.start_session(&key).await?;

        match args.answers {
            Some(path) => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let run: ScriptedRun = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid answers file {}", path.display()))?;
                run_scripted(&self.service, &self.renderer, session, run).await
            }
            None => {
                let stdin = std::io::stdin();
                run_interactive(&self.service, &self.renderer, session, stdin.lock()).await
            }
        }
    }
}
