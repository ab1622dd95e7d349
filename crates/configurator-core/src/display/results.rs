//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{ConfiguratorSchema, Submission};

/// Outcome of importing a definition.
pub struct ImportResult {
    pub schema: ConfiguratorSchema,
    pub replaced: bool,
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} configurator '{}' with ID: {} ({} steps)",
            if self.replaced { "Replaced" } else { "Imported" },
            self.schema.slug,
            self.schema.id,
            self.schema.steps.len()
        )
    }
}

/// Outcome of deleting a definition.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<ConfiguratorSchema> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted configurator '{}' (ID: {}). Its submissions were kept.",
            self.resource.name, self.resource.id
        )
    }
}

/// Outcome of a back-office status change.
pub struct StatusChange {
    pub submission: Submission,
}

impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Submission {} is now {}",
            self.submission.id, self.submission.status
        )
    }
}

/// Confirmation shown to the customer after a successful submit.
pub struct SubmitResult<'a> {
    pub submission: &'a Submission,
}

impl fmt::Display for SubmitResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Thank you, {}!", self.submission.contact.name)?;
        writeln!(f)?;
        writeln!(
            f,
            "Your request was received with reference **{}**. We will contact you at {}.",
            self.submission.id, self.submission.contact.email
        )?;
        if self.submission.appointment.wanted {
            writeln!(f)?;
            writeln!(
                f,
                "Requested appointment: {} at {}",
                self.submission.appointment.date.as_deref().unwrap_or("-"),
                self.submission.appointment.time.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}
