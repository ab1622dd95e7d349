//! Short status lines shown after an action.

use std::fmt;

/// Outcome level of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Warning,
    Failure,
}

/// A one-line confirmation, warning or error.
pub struct OperationStatus {
    pub message: String,
    pub level: StatusLevel,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, message)
    }

    /// Something the user can fix, e.g. a rejected answer.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Failure, message)
    }

    fn new(level: StatusLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            StatusLevel::Success => "**Success:**",
            StatusLevel::Warning => "**Check:**",
            StatusLevel::Failure => "**Error:**",
        };
        writeln!(f, "{prefix} {}", self.message)
    }
}
