//! Builder for creating and configuring [`ConfiguratorService`] instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::task;

use super::ConfiguratorService;
use crate::{
    db::Database,
    error::{ConfiguratorError, Result},
    models::FALLBACK_LOCALE,
    submit::{WebhookNotifier, DEFAULT_WEBHOOK_TIMEOUT},
};

/// Builder for creating and configuring [`ConfiguratorService`] instances.
#[derive(Debug, Clone)]
pub struct ConfiguratorServiceBuilder {
    database_path: Option<PathBuf>,
    webhook_url: Option<String>,
    webhook_timeout: Duration,
    locale: String,
}

impl ConfiguratorServiceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            webhook_url: None,
            webhook_timeout: DEFAULT_WEBHOOK_TIMEOUT,
            locale: FALLBACK_LOCALE.to_string(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/configurator/configurator.db` or
    /// `~/.local/share/configurator/configurator.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the URL submissions are posted to. Without one, submissions are
    /// only stored.
    pub fn with_webhook_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        self.webhook_url = url.map(Into::into).filter(|url| !url.trim().is_empty());
        self
    }

    pub fn with_webhook_timeout(mut self, timeout: Duration) -> Self {
        self.webhook_timeout = timeout;
        self
    }

    /// Sets the locale for labels, e.g. `nl`.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Builds the configured service, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfiguratorError::FileSystem` if the database directory
    /// cannot be created, `ConfiguratorError::Database` if initialization
    /// fails and `ConfiguratorError::Configuration` for an unusable webhook
    /// URL or locale.
    pub async fn build(self) -> Result<ConfiguratorService> {
        let locale = self.locale.trim().to_string();
        if locale.is_empty() {
            return Err(ConfiguratorError::Configuration {
                message: "Locale must not be empty".to_string(),
            });
        }

        let notifier = self
            .webhook_url
            .map(|url| WebhookNotifier::new(url, self.webhook_timeout))
            .transpose()?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfiguratorError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), ConfiguratorError>(())
        })
        .await
        .map_err(ConfiguratorError::join)??;

        log::debug!("Using database at {}", db_path.display());
        Ok(ConfiguratorService::new(db_path, notifier, locale))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("configurator")
            .place_data_file("configurator.db")
            .map_err(|e| ConfiguratorError::XdgDirectory(e.to_string()))
    }
}

impl Default for ConfiguratorServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
