//! Per-step answer validation.
//!
//! Exactly one error is reported per step: required-ness first, then the
//! rules of the step's input kind.

use thiserror::Error;

use super::coerce::{answer_to_text, number_to_text};
use crate::models::{AnswerValue, InputKind, Measurement, NumberRange, Step};

/// Why an answer was refused. Field-scoped and fixable by the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    MissingRequired,
    #[error("Value must be at least {}", bound(.min))]
    BelowMinimum { min: f64 },
    #[error("Value must be at most {}", bound(.max))]
    AboveMaximum { max: f64 },
    #[error("Value does not match the expected format")]
    PatternMismatch { pattern: String },
    #[error("Value must be a number")]
    NotANumber,
    #[error("'{value}' is not one of the available options")]
    UnknownOption { value: String },
    #[error("Select at least {min} options")]
    TooFewSelections { min: u32 },
    #[error("Select at most {max} options")]
    TooManySelections { max: u32 },
    #[error("{key}: {error}")]
    Measurement {
        key: String,
        error: Box<ValidationError>,
    },
}

fn bound(n: &f64) -> String {
    number_to_text(*n)
}

impl ValidationError {
    fn for_measurement(key: &str, error: ValidationError) -> Self {
        ValidationError::Measurement {
            key: key.to_string(),
            error: Box::new(error),
        }
    }
}

/// Validates the answer for `step`. `None` means "not answered".
pub fn validate(step: &Step, value: Option<&AnswerValue>) -> Result<(), ValidationError> {
    let value = match value.filter(|v| !v.is_blank()) {
        Some(value) => value,
        None if step.required => return Err(ValidationError::MissingRequired),
        None => return Ok(()),
    };

    match &step.kind {
        InputKind::Number { .. } | InputKind::Dimension { .. } => {
            let range = step.kind.range().unwrap_or_default();
            let number = value.as_number().ok_or(ValidationError::NotANumber)?;
            check_range(number, &range)
        }
        InputKind::Text { pattern: Some(pattern) } => {
            let text = answer_to_text(value);
            if pattern.is_match(&text) {
                Ok(())
            } else {
                Err(ValidationError::PatternMismatch {
                    pattern: pattern.as_str().to_string(),
                })
            }
        }
        InputKind::RadioImage { .. } | InputKind::Radio { .. } | InputKind::Select { .. } => {
            check_known_options(step, &value.choices())
        }
        InputKind::Checkbox {
            min_selections,
            max_selections,
            ..
        } => {
            let choices = value.choices();
            check_known_options(step, &choices)?;
            let count = choices.len() as u32;
            if let Some(min) = *min_selections {
                if count < min {
                    return Err(ValidationError::TooFewSelections { min });
                }
            }
            if let Some(max) = *max_selections {
                if count > max {
                    return Err(ValidationError::TooManySelections { max });
                }
            }
            Ok(())
        }
        InputKind::Dimensions { measurements } => {
            check_measurements(measurements, value, step.required)
        }
        InputKind::Text { pattern: None } | InputKind::Textarea => Ok(()),
    }
}

fn check_range(number: f64, range: &NumberRange) -> Result<(), ValidationError> {
    if let Some(min) = range.min_value {
        if number < min {
            return Err(ValidationError::BelowMinimum { min });
        }
    }
    if let Some(max) = range.max_value {
        if number > max {
            return Err(ValidationError::AboveMaximum { max });
        }
    }
    Ok(())
}

fn check_known_options(step: &Step, choices: &[&str]) -> Result<(), ValidationError> {
    if step.options().is_empty() {
        return Ok(());
    }
    match choices.iter().find(|choice| step.option(choice).is_none()) {
        Some(unknown) => Err(ValidationError::UnknownOption {
            value: unknown.to_string(),
        }),
        None => Ok(()),
    }
}

/// Every measurement is range-checked when present. On a required step every
/// measurement must be present.
fn check_measurements(
    measurements: &[Measurement],
    value: &AnswerValue,
    required: bool,
) -> Result<(), ValidationError> {
    let AnswerValue::Measurements(values) = value else {
        return Err(ValidationError::NotANumber);
    };
    for measurement in measurements {
        match values.get(&measurement.key) {
            Some(number) if number.is_finite() => check_range(*number, &measurement.range)
                .map_err(|e| ValidationError::for_measurement(&measurement.key, e))?,
            Some(_) => {
                return Err(ValidationError::for_measurement(
                    &measurement.key,
                    ValidationError::NotANumber,
                ))
            }
            None if required => {
                return Err(ValidationError::for_measurement(
                    &measurement.key,
                    ValidationError::MissingRequired,
                ))
            }
            None => {}
        }
    }
    Ok(())
}
