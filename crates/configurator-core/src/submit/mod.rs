//! Submission assembly: precondition checks, persistence and webhook fan-out.
//!
//! ```text
//! check contact/appointment ──▶ SubmissionSink::insert_submission ──▶ Notifier::notify
//!        (no side effects)            (failure aborts)                  (failure logged)
//! ```
//!
//! The store and the notifier are traits so the assembler can run against
//! the SQLite-backed [`crate::service::ConfiguratorService`] and a
//! [`WebhookNotifier`], or in-memory fakes in tests.

pub mod payload;
pub mod webhook;

use async_trait::async_trait;
use jiff::Timestamp;
use log::{info, warn};
use thiserror::Error;

pub use payload::{display_value, ConfiguratorRef, LabeledAnswer, WebhookPayload};
pub use webhook::{WebhookNotifier, DEFAULT_WEBHOOK_TIMEOUT};

use crate::{
    error::{ConfiguratorError, Result},
    models::{
        Answers, AppointmentSelection, ConfiguratorSchema, ContactInfo, NewSubmission, Submission,
    },
};

/// Store that accepts new submissions.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission>;
}

/// Best-effort delivery of a stored submission to an external system.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, payload: &WebhookPayload) -> Result<()>;
}

/// Why a submit did not produce a stored submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("All steps must be completed before submitting")]
    StepsIncomplete,
    #[error("Contact details incomplete, missing: {}", .missing.join(", "))]
    ContactIncomplete { missing: Vec<&'static str> },
    #[error("Appointment request incomplete, missing: {}", .missing.join(", "))]
    AppointmentIncomplete { missing: Vec<&'static str> },
    #[error("Your request could not be saved, please try again")]
    Persistence(#[source] ConfiguratorError),
}

/// Checks the contact block and, when an appointment is wanted, its date and
/// time. Runs before any side effect.
pub fn check_preconditions(
    contact: &ContactInfo,
    appointment: &AppointmentSelection,
) -> std::result::Result<(), SubmitError> {
    let missing = contact.missing_fields();
    if !missing.is_empty() {
        return Err(SubmitError::ContactIncomplete { missing });
    }
    let missing = appointment.missing_fields();
    if !missing.is_empty() {
        return Err(SubmitError::AppointmentIncomplete { missing });
    }
    Ok(())
}

/// Turns a finished wizard into a stored submission and a notification.
pub struct SubmissionAssembler<'a> {
    sink: &'a dyn SubmissionSink,
    notifier: Option<&'a dyn Notifier>,
    locale: String,
}

impl<'a> SubmissionAssembler<'a> {
    pub fn new(sink: &'a dyn SubmissionSink) -> Self {
        Self {
            sink,
            notifier: None,
            locale: crate::models::FALLBACK_LOCALE.to_string(),
        }
    }

    pub fn with_notifier(mut self, notifier: Option<&'a dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Persists the submission, then notifies.
    ///
    /// Succeeds as soon as the submission is stored. Notification failures
    /// are logged and otherwise ignored; they are never retried.
    pub async fn submit(
        &self,
        schema: &ConfiguratorSchema,
        answers: Answers,
        contact: ContactInfo,
        appointment: AppointmentSelection,
    ) -> std::result::Result<Submission, SubmitError> {
        check_preconditions(&contact, &appointment)?;

        let new = NewSubmission {
            configurator_id: schema.id,
            answers,
            contact,
            appointment,
            locale: self.locale.clone(),
            submitted_at: Timestamp::now(),
        };
        let submission = self
            .sink
            .insert_submission(new)
            .await
            .map_err(SubmitError::Persistence)?;
        info!(
            "Stored submission {} for configurator '{}'",
            submission.id, schema.slug
        );

        if let Some(notifier) = self.notifier {
            let payload = WebhookPayload::build(schema, &submission);
            if let Err(e) = notifier.notify(&payload).await {
                warn!("Webhook for submission {} failed: {e}", submission.id);
            }
        }

        Ok(submission)
    }
}
