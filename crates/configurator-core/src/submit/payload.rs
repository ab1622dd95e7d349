//! Denormalized webhook payload for a stored submission.

use serde::Serialize;

use crate::{
    engine::{
        coerce::{answer_to_text, number_to_text},
        compute_visible_steps,
    },
    models::{
        AnswerValue, Answers, AppointmentSelection, ConfiguratorSchema, ContactInfo, InputKind,
        Step, Submission,
    },
};

/// Event name sent with every payload.
pub const SUBMISSION_EVENT: &str = "configurator.submission";

/// Everything an automation needs without reading the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub event: &'static str,
    pub submission_id: u64,
    pub configurator: ConfiguratorRef,
    pub answers: Answers,
    pub answers_with_labels: Vec<LabeledAnswer>,
    pub contact: ContactInfo,
    pub appointment: AppointmentSelection,
    pub locale: String,
    pub step_count: usize,
    pub submitted_at: String,
}

/// Identity of the configurator a submission belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfiguratorRef {
    pub id: u64,
    pub slug: String,
    pub name: String,
}

/// One answer with its question text and human-readable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledAnswer {
    pub field: String,
    pub question: String,
    pub value: AnswerValue,
    pub display: String,
}

impl WebhookPayload {
    /// Builds the payload, resolving labels in the submission's locale.
    pub fn build(schema: &ConfiguratorSchema, submission: &Submission) -> Self {
        let locale = submission.locale.as_str();
        let answers_with_labels = schema
            .steps
            .iter()
            .filter_map(|step| {
                submission
                    .answers
                    .get(&step.field_name)
                    .map(|value| label_answer(step, value, locale))
            })
            .collect();

        Self {
            event: SUBMISSION_EVENT,
            submission_id: submission.id,
            configurator: ConfiguratorRef {
                id: schema.id,
                slug: schema.slug.clone(),
                name: schema.name.clone(),
            },
            answers: submission.answers.clone(),
            answers_with_labels,
            contact: submission.contact.clone(),
            appointment: submission.appointment.clone(),
            locale: submission.locale.clone(),
            step_count: compute_visible_steps(&schema.steps, &submission.answers).len(),
            submitted_at: submission.submitted_at.to_string(),
        }
    }
}

fn label_answer(step: &Step, value: &AnswerValue, locale: &str) -> LabeledAnswer {
    LabeledAnswer {
        field: step.field_name.clone(),
        question: step.title.resolve_or(locale, &step.field_name).to_string(),
        value: value.clone(),
        display: display_value(step, value, locale),
    }
}

/// Human-readable rendering of an answer: option labels for choices, units
/// for measurements.
pub fn display_value(step: &Step, value: &AnswerValue, locale: &str) -> String {
    match (&step.kind, value) {
        (kind, value) if kind.is_choice() => value
            .choices()
            .into_iter()
            .map(|choice| {
                step.option(choice)
                    .map(|option| option.label.resolve_or(locale, choice).to_string())
                    .unwrap_or_else(|| choice.to_string())
            })
            .collect::<Vec<_>>()
            .join(", "),
        (InputKind::Dimension { unit, .. }, AnswerValue::Number(n)) => {
            with_unit(number_to_text(*n), unit.as_deref())
        }
        (InputKind::Dimensions { measurements }, AnswerValue::Measurements(values)) => {
            measurements
                .iter()
                .filter_map(|measurement| {
                    values.get(&measurement.key).map(|n| {
                        format!(
                            "{}: {}",
                            measurement.label.resolve_or(locale, &measurement.key),
                            with_unit(number_to_text(*n), measurement.unit.as_deref())
                        )
                    })
                })
                .collect::<Vec<_>>()
                .join(", ")
        }
        (_, value) => answer_to_text(value),
    }
}

fn with_unit(text: String, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{text} {unit}"),
        None => text,
    }
}
