//! Error types for the configurator library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for store, schema and service operations.
///
/// Wizard-level failures (validation, navigation, submit preconditions) have
/// their own small enums in [`crate::engine`] and [`crate::submit`]; this type
/// covers everything that talks to the outside world.
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Configurator not found for the given ID or slug
    #[error("Configurator '{key}' not found")]
    ConfiguratorNotFound { key: String },
    /// Submission not found for the given ID
    #[error("Submission with ID {id} not found")]
    SubmissionNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A configurator definition that cannot be run
    #[error("Invalid configurator definition: {reason}")]
    InvalidSchema { reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Webhook delivery errors. Never surfaced to wizard users.
    #[error("Notification error: {message}")]
    Notification { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ConfiguratorError {
        ConfiguratorError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ConfiguratorError {
        ConfiguratorError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ConfiguratorError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an invalid definition error.
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Creates a notification error from any displayable cause.
    pub fn notification(message: impl std::fmt::Display) -> Self {
        Self::Notification {
            message: message.to_string(),
        }
    }

    /// Wraps a failed `spawn_blocking` join.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ConfiguratorError::database(message).with_source(e))
    }
}

/// Result type alias for configurator operations
pub type Result<T> = std::result::Result<T, ConfiguratorError>;
