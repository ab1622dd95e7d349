//! Async service API over the store, the engine and the submission pipeline.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Front ends    │    │   Operations    │    │    Database     │
//! │ (CLI, wizard)   │───▶│ (configurator_, │───▶│   (via db/)     │
//! │                 │    │  submission_ops)│    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every store access opens the database inside `spawn_blocking`, so the
//! service can be shared across tasks without holding a connection.
//!
//! # Example
//!
//! ```rust,no_run
//! use configurator_core::{params::ConfiguratorKey, ConfiguratorServiceBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ConfiguratorServiceBuilder::new()
//!     .with_database_path(Some("configurator.db"))
//!     .with_webhook_url(Some("https://hooks.example.com/quotes"))
//!     .build()
//!     .await?;
//!
//! let session = service.start_session(&ConfiguratorKey::from("veranda")).await?;
//! println!("{} steps to go", session.len());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::task;

use crate::{
    db::Database,
    error::{ConfiguratorError, Result},
    models::{NewSubmission, Submission},
    submit::{SubmissionSink, WebhookNotifier},
};

pub mod builder;
pub mod configurator_ops;
pub mod submission_ops;


pub use builder::ConfiguratorServiceBuilder;

/// Entry point for configurator operations.
pub struct ConfiguratorService {
    pub(crate) db_path: PathBuf,
    pub(crate) notifier: Option<WebhookNotifier>,
    pub(crate) locale: String,
}

impl ConfiguratorService {
    pub(crate) fn new(db_path: PathBuf, notifier: Option<WebhookNotifier>, locale: String) -> Self {
        Self {
            db_path,
            notifier,
            locale,
        }
    }

    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Locale used for labels and recorded on submissions.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn webhook_url(&self) -> Option<&str> {
        self.notifier.as_ref().map(WebhookNotifier::url)
    }

    /// Runs `operation` against a freshly opened database on the blocking
    /// pool.
    pub(crate) async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(ConfiguratorError::join)?
    }
}

#[async_trait]
impl SubmissionSink for ConfiguratorService {
    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.with_database(move |db| db.insert_submission(&submission))
            .await
    }
}
