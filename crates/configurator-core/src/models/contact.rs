//! Contact details and appointment request entered on the final step.

use serde::{Deserialize, Serialize};

/// Who is asking for the quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Names of the required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Optional showroom/on-site appointment attached to a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSelection {
    #[serde(default)]
    pub wanted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    /// Requested date, as entered (e.g. `2026-11-03`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Requested time slot, as entered (e.g. `10:30`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl AppointmentSelection {
    /// No appointment requested.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn requested(
        service_type: Option<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            wanted: true,
            service_type,
            date: Some(date.into()),
            time: Some(time.into()),
        }
    }

    /// Blank fields that must be filled when an appointment is wanted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        if !self.wanted {
            return Vec::new();
        }
        [("date", &self.date), ("time", &self.time)]
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(field, _)| field)
            .collect()
    }
}
