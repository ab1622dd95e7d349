//! Submission records produced by completed wizard runs.

use std::str::FromStr;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AppointmentSelection, Answers, ContactInfo};

/// Back-office processing state of a submission.
///
/// The wizard only ever creates `New` records; later transitions belong to
/// the back office.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Closed,
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(SubmissionStatus::New),
            "contacted" => Ok(SubmissionStatus::Contacted),
            "quoted" => Ok(SubmissionStatus::Quoted),
            "closed" => Ok(SubmissionStatus::Closed),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

impl SubmissionStatus {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Contacted => "contacted",
            SubmissionStatus::Quoted => "quoted",
            SubmissionStatus::Closed => "closed",
        }
    }
}

/// A submission about to be written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub configurator_id: u64,
    pub answers: Answers,
    pub contact: ContactInfo,
    pub appointment: AppointmentSelection,
    pub locale: String,
    pub submitted_at: Timestamp,
}

/// A stored submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub configurator_id: u64,
    pub answers: Answers,
    pub contact: ContactInfo,
    pub appointment: AppointmentSelection,
    pub status: SubmissionStatus,
    pub locale: String,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Submission {
    /// The record as stored right after insertion.
    pub fn from_new(id: u64, new: NewSubmission) -> Self {
        Self {
            id,
            configurator_id: new.configurator_id,
            answers: new.answers,
            contact: new.contact,
            appointment: new.appointment,
            status: SubmissionStatus::New,
            locale: new.locale,
            submitted_at: new.submitted_at,
            updated_at: new.submitted_at,
        }
    }
}

/// Filter options for listing submissions.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub status: Option<SubmissionStatus>,
    pub configurator_id: Option<u64>,
}
