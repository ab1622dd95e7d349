use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{SchemaCommands, SubmissionCommands, WizardArgs};

/// Product configurator: guided quote wizards and their back office
///
/// Configurators are imported from JSON definitions and walked through step
/// by step, either interactively on the terminal or from a scripted answers
/// file. Finished runs are stored as submissions and, when a webhook URL is
/// configured, posted to an automation endpoint.
#[derive(Parser)]
#[command(version, about, name = "configurator")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/configurator/configurator.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Endpoint that receives every new submission as JSON
    #[arg(long, global = true, env = "CONFIGURATOR_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Seconds to wait for the webhook endpoint
    #[arg(long, global = true, default_value_t = 10)]
    pub webhook_timeout: u64,

    /// Language used for questions and option labels
    #[arg(long, global = true, env = "CONFIGURATOR_LOCALE", default_value = "en")]
    pub locale: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `schema`: import, inspect and delete configurator definitions
/// - `wizard`: run a configurator and submit the result
/// - `submission`: back-office view of stored submissions
#[derive(Subcommand)]
pub enum Commands {
    /// Manage configurator definitions
    #[command(alias = "s")]
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
    /// Run a configurator wizard
    #[command(alias = "w")]
    Wizard(WizardArgs),
    /// Review submissions
    #[command(alias = "sub")]
    Submission {
        #[command(subcommand)]
        command: SubmissionCommands,
    },
}
