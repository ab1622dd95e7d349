//! Flat row layout of a step as kept by the store.
//!
//! The store keeps every kind-specific setting in its own nullable column.
//! [`StepRecord`] mirrors that layout; converting it into a [`Step`] picks the
//! columns the input kind needs and rejects rows whose settings do not fit.

use super::{InputKind, LocalizedText, Measurement, Pattern, Step, StepOption, Visibility};
use crate::error::{ConfiguratorError, Result};

/// A step row with all optional columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepRecord {
    pub order: u32,
    pub field_name: String,
    pub input_type: String,
    pub required: bool,
    pub title: LocalizedText,
    pub description: Option<LocalizedText>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub step_value: Option<f64>,
    pub validation_pattern: Option<String>,
    pub unit: Option<String>,
    pub min_selections: Option<u32>,
    pub max_selections: Option<u32>,
    pub measurements: Vec<Measurement>,
    pub visibility: Option<Visibility>,
    pub options: Vec<StepOption>,
}

impl From<&Step> for StepRecord {
    fn from(step: &Step) -> Self {
        let mut record = StepRecord {
            order: step.order,
            field_name: step.field_name.clone(),
            input_type: step.input_type().to_string(),
            required: step.required,
            title: step.title.clone(),
            description: step.description.clone(),
            visibility: step.visibility.clone(),
            options: step.options().to_vec(),
            ..Default::default()
        };

        if let Some(range) = step.kind.range() {
            record.min_value = range.min_value;
            record.max_value = range.max_value;
            record.step_value = range.step_value;
        }

        match &step.kind {
            InputKind::Checkbox {
                min_selections,
                max_selections,
                ..
            } => {
                record.min_selections = *min_selections;
                record.max_selections = *max_selections;
            }
            InputKind::Text { pattern } => {
                record.validation_pattern = pattern.as_ref().map(|p| p.as_str().to_string());
            }
            InputKind::Dimension { unit, .. } => record.unit = unit.clone(),
            InputKind::Dimensions { measurements } => record.measurements = measurements.clone(),
            _ => {}
        }

        record
    }
}

impl TryFrom<StepRecord> for Step {
    type Error = ConfiguratorError;

    fn try_from(record: StepRecord) -> Result<Self> {
        let field = record.field_name.clone();
        let invalid = |reason: String| {
            ConfiguratorError::invalid_schema(format!("stored step '{field}': {reason}"))
        };

        let kind = match record.input_type.as_str() {
            "radioImage" => InputKind::RadioImage {
                options: record.options,
            },
            "radio" => InputKind::Radio {
                options: record.options,
            },
            "select" => InputKind::Select {
                options: record.options,
            },
            "checkbox" => InputKind::Checkbox {
                options: record.options,
                min_selections: record.min_selections,
                max_selections: record.max_selections,
            },
            "text" => InputKind::Text {
                pattern: record
                    .validation_pattern
                    .as_deref()
                    .map(Pattern::new)
                    .transpose()
                    .map_err(|e| invalid(format!("bad validation pattern: {e}")))?,
            },
            "textarea" => InputKind::Textarea,
            "number" => InputKind::Number {
                min_value: record.min_value,
                max_value: record.max_value,
                step_value: record.step_value,
            },
            "dimension" => InputKind::Dimension {
                min_value: record.min_value,
                max_value: record.max_value,
                step_value: record.step_value,
                unit: record.unit,
            },
            "dimensions" => {
                if record.measurements.is_empty() {
                    return Err(invalid("dimensions step without measurements".to_string()));
                }
                InputKind::Dimensions {
                    measurements: record.measurements,
                }
            }
            other => return Err(invalid(format!("unknown input type '{other}'"))),
        };

        Ok(Step {
            order: record.order,
            field_name: record.field_name,
            title: record.title,
            description: record.description,
            required: record.required,
            visibility: record.visibility,
            kind,
        })
    }
}
