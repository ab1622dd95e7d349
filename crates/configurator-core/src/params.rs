//! Parameter structures for configurator operations.
//!
//! Plain structures shared by every front end. Interface layers wrap them
//! with their own derives (clap `Args` in the CLI) and convert with `.into()`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘
//! ```

use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{ConfiguratorDefinition, SubmissionStatus};

/// Parameters for operations addressed by a numeric ID.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    pub id: u64,
}

/// Identifies a configurator either by numeric ID or by slug.
///
/// A key that parses as a number is tried as an ID first and then as a slug,
/// since slugs may consist of digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct ConfiguratorKey(pub String);

impl ConfiguratorKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_id(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfiguratorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConfiguratorKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<u64> for ConfiguratorKey {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Parameters for importing a configurator definition.
#[derive(Debug, Clone)]
pub struct ImportConfigurator {
    pub definition: ConfiguratorDefinition,
    /// Replace an existing configurator with the same slug
    pub replace: bool,
}

/// Parameters for listing submissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListSubmissions {
    pub status: Option<SubmissionStatus>,
    /// Only submissions of this configurator
    pub configurator: Option<ConfiguratorKey>,
}

/// Parameters for moving a submission to another back-office status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateSubmissionStatus {
    pub id: u64,
    pub status: SubmissionStatus,
}
