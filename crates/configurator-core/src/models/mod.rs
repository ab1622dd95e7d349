//! Data models for configurators, steps, answers and submissions.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures separate from
//! presentation.
//!
//! # Step kinds
//!
//! A [`Step`] carries its input settings in an [`InputKind`] tagged union, so
//! a `number` step has bounds, a `text` step has a pattern, a `dimensions`
//! step has its measurements, and nothing else:
//!
//! ```rust
//! use configurator_core::models::{InputKind, Step};
//!
//! let json = r#"{
//!     "order": 2,
//!     "fieldName": "width",
//!     "title": {"en": "Width (cm)"},
//!     "required": true,
//!     "inputType": "number",
//!     "minValue": 100,
//!     "maxValue": 1000
//! }"#;
//! let step: Step = serde_json::from_str(json).unwrap();
//! assert!(matches!(step.kind, InputKind::Number { min_value: Some(_), .. }));
//! ```
//!
//! # Answers
//!
//! [`Answers`] is a flat map from field name to [`AnswerValue`]. The reserved
//! [`MORE_CUSTOMIZATION_FIELD`] key holds the gateway choice.

pub mod answers;
pub mod condition;
pub mod contact;
pub mod record;
pub mod schema;
pub mod step;
pub mod submission;
pub mod text;

#[cfg(test)]
mod tests;

pub use answers::{AnswerValue, Answers, MORE_CUSTOMIZATION_FIELD};
pub use condition::{Condition, Operator, Visibility};
pub use contact::{AppointmentSelection, ContactInfo};
pub use record::StepRecord;
pub use schema::{ConfiguratorDefinition, ConfiguratorSchema, ConfiguratorSummary};
pub use step::{InputKind, Measurement, NumberRange, Pattern, Step, StepOption};
pub use submission::{NewSubmission, Submission, SubmissionFilter, SubmissionStatus};
pub use text::{LocalizedText, FALLBACK_LOCALE};
