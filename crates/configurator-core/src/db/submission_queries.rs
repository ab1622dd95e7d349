//! Submission storage: the insert used by the wizard and the back-office
//! queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{json_column, parsed_column, timestamp_column, to_json};
use crate::{
    error::{ConfiguratorError, DatabaseResultExt, Result},
    models::{
        AppointmentSelection, ContactInfo, NewSubmission, Submission, SubmissionFilter,
        SubmissionStatus,
    },
};

const CHECK_CONFIGURATOR_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM configurators WHERE id = ?1)";
const INSERT_SUBMISSION_SQL: &str = "INSERT INTO submissions (configurator_id, answers, contact_name, contact_email, contact_phone, contact_address, contact_city, contact_notes, appointment_wanted, appointment_service_type, appointment_date, appointment_time, status, locale, submitted_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";
const SUBMISSION_COLUMNS: &str = "id, configurator_id, answers, contact_name, contact_email, contact_phone, contact_address, contact_city, contact_notes, appointment_wanted, appointment_service_type, appointment_date, appointment_time, status, locale, submitted_at, updated_at";
const UPDATE_STATUS_SQL: &str = "UPDATE submissions SET status = ?1, updated_at = ?2 WHERE id = ?3";

fn submission_from_row(row: &Row<'_>) -> rusqlite::Result<Submission> {
    Ok(Submission {
        id: row.get::<_, i64>(0)? as u64,
        configurator_id: row.get::<_, i64>(1)? as u64,
        answers: json_column(row, 2)?,
        contact: ContactInfo {
            name: row.get(3)?,
            email: row.get(4)?,
            phone: row.get(5)?,
            address: row.get(6)?,
            city: row.get(7)?,
            notes: row.get(8)?,
        },
        appointment: AppointmentSelection {
            wanted: row.get(9)?,
            service_type: row.get(10)?,
            date: row.get(11)?,
            time: row.get(12)?,
        },
        status: parsed_column::<SubmissionStatus>(row, 13)?,
        locale: row.get(14)?,
        submitted_at: timestamp_column(row, 15)?,
        updated_at: timestamp_column(row, 16)?,
    })
}

impl super::Database {
    /// Stores a new submission with status `new`.
    pub fn insert_submission(&mut self, submission: &NewSubmission) -> Result<Submission> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(
                CHECK_CONFIGURATOR_EXISTS_SQL,
                params![submission.configurator_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check configurator existence")?;
        if !exists {
            return Err(ConfiguratorError::ConfiguratorNotFound {
                key: submission.configurator_id.to_string(),
            });
        }

        let submitted_at = submission.submitted_at.to_string();
        let contact = &submission.contact;
        let appointment = &submission.appointment;
        tx.execute(
            INSERT_SUBMISSION_SQL,
            params![
                submission.configurator_id as i64,
                to_json(&submission.answers)?,
                &contact.name,
                &contact.email,
                &contact.phone,
                &contact.address,
                &contact.city,
                &contact.notes,
                appointment.wanted,
                &appointment.service_type,
                &appointment.date,
                &appointment.time,
                SubmissionStatus::New.as_str(),
                &submission.locale,
                &submitted_at,
                &submitted_at,
            ],
        )
        .db_context("Failed to insert submission")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Submission::from_new(id, submission.clone()))
    }

    pub fn get_submission(&self, id: u64) -> Result<Option<Submission>> {
        let query = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?1");
        self.connection
            .query_row(&query, params![id as i64], submission_from_row)
            .optional()
            .db_context("Failed to query submission")
    }

    /// Lists submissions, newest first (by insertion order).
    pub fn list_submissions(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>> {
        let mut query = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }
        if let Some(configurator_id) = filter.configurator_id {
            conditions.push("configurator_id = ?");
            params_vec.push(Box::new(configurator_id as i64));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let submissions = stmt
            .query_map(&params_refs[..], submission_from_row)
            .db_context("Failed to query submissions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read submission row")?;

        Ok(submissions)
    }

    /// Moves a submission to another back-office status. Returns the updated
    /// record, or `None` when no submission has this id.
    pub fn update_submission_status(
        &mut self,
        id: u64,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        let updated = self
            .connection
            .execute(
                UPDATE_STATUS_SQL,
                params![status.as_str(), Timestamp::now().to_string(), id as i64],
            )
            .db_context("Failed to update submission status")?;

        if updated == 0 {
            return Ok(None);
        }
        self.get_submission(id)
    }
}
