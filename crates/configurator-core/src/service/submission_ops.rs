//! Wizard sessions and submission operations for the service.

use super::{configurator_ops::load_by_key, ConfiguratorService};
use crate::{
    engine::WizardSession,
    error::{ConfiguratorError, Result},
    models::{AppointmentSelection, ContactInfo, Submission, SubmissionFilter},
    params::{ConfiguratorKey, Id, ListSubmissions, UpdateSubmissionStatus},
    submit::{Notifier, SubmissionAssembler, SubmitError},
};

impl ConfiguratorService {
    /// Loads a configurator and starts a wizard session at its first step.
    pub async fn start_session(&self, key: &ConfiguratorKey) -> Result<WizardSession> {
        let schema = self.find_configurator(key).await?;
        log::debug!(
            "Starting wizard for '{}' with {} steps",
            schema.slug,
            schema.steps.len()
        );
        Ok(WizardSession::new(schema))
    }

    /// Stores the session's answers with the contact details and posts the
    /// webhook when one is configured.
    ///
    /// Only answers of steps visible at submit time are stored. The webhook
    /// outcome never affects the result.
    pub async fn submit(
        &self,
        session: &WizardSession,
        contact: ContactInfo,
        appointment: AppointmentSelection,
    ) -> std::result::Result<Submission, SubmitError> {
        if !session.is_complete() {
            return Err(SubmitError::StepsIncomplete);
        }

        SubmissionAssembler::new(self)
            .with_notifier(self.notifier.as_ref().map(|n| n as &dyn Notifier))
            .with_locale(self.locale.clone())
            .submit(
                session.schema(),
                session.submission_answers(),
                contact,
                appointment,
            )
            .await
    }

    /// Retrieves a submission by its ID.
    pub async fn get_submission(&self, params: &Id) -> Result<Option<Submission>> {
        let id = params.id;
        self.with_database(move |db| db.get_submission(id)).await
    }

    /// Lists submissions, newest first.
    pub async fn list_submissions(&self, params: &ListSubmissions) -> Result<Vec<Submission>> {
        let status = params.status;
        let key = params.configurator.clone();

        self.with_database(move |db| {
            let configurator_id = match key {
                Some(key) => Some(
                    load_by_key(db, &key)?
                        .ok_or_else(|| ConfiguratorError::ConfiguratorNotFound {
                            key: key.to_string(),
                        })?
                        .id,
                ),
                None => None,
            };
            db.list_submissions(&SubmissionFilter {
                status,
                configurator_id,
            })
        })
        .await
    }

    /// Moves a submission to another back-office status.
    pub async fn update_submission_status(&self, params: &UpdateSubmissionStatus) -> Result<Submission> {
        let id = params.id;
        let status = params.status;

        let updated = self
            .with_database(move |db| db.update_submission_status(id, status))
            .await?
            .ok_or(ConfiguratorError::SubmissionNotFound { id })?;

        log::info!("Submission {id} is now {}", status.as_str());
        Ok(updated)
    }
}
