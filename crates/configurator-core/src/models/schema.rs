//! Configurator schema, import definition and listing summary.

use std::collections::HashSet;

use jiff::Timestamp;
use log::warn;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{InputKind, Operator, Step, MORE_CUSTOMIZATION_FIELD};
use crate::error::{ConfiguratorError, Result};

/// A loaded configurator: identity plus its ordered steps.
///
/// Read-only for the duration of a wizard run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguratorSchema {
    pub id: u64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    /// Steps sorted by `order`, with active options sorted by display order
    pub steps: Vec<Step>,
}

impl ConfiguratorSchema {
    /// Builds an in-memory schema, sorting steps by order.
    pub fn new(id: u64, slug: impl Into<String>, name: impl Into<String>, mut steps: Vec<Step>) -> Self {
        steps.sort_by_key(|step| step.order);
        Self {
            id,
            slug: slug.into(),
            name: name.into(),
            description: None,
            steps,
        }
    }

    pub fn step(&self, field_name: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.field_name == field_name)
    }
}

/// Import format of a configurator, as written by the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConfiguratorDefinition {
    /// URL-safe unique identifier, e.g. `veranda`
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<Step>,
}

impl ConfiguratorDefinition {
    /// Checks the structural rules a definition must satisfy before it can
    /// be stored and run.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_slug(&self.slug) {
            return Err(ConfiguratorError::invalid_input("slug")
                .with_reason("use lowercase letters, digits and dashes"));
        }
        if self.name.trim().is_empty() {
            return Err(ConfiguratorError::invalid_input("name").with_reason("must not be empty"));
        }
        if self.steps.is_empty() {
            return Err(ConfiguratorError::invalid_schema("a configurator needs at least one step"));
        }

        let mut fields = HashSet::new();
        let mut last_order = None;
        let mut first_optional: Option<&str> = None;
        for step in &self.steps {
            let field = step.field_name.as_str();
            if field.trim().is_empty() {
                return Err(ConfiguratorError::invalid_schema(format!(
                    "step {} has an empty field name",
                    step.order
                )));
            }
            if field == MORE_CUSTOMIZATION_FIELD {
                return Err(ConfiguratorError::invalid_schema(format!(
                    "'{MORE_CUSTOMIZATION_FIELD}' is reserved for the gateway question"
                )));
            }
            if !fields.insert(field) {
                return Err(ConfiguratorError::invalid_schema(format!(
                    "field name '{field}' is used by more than one step"
                )));
            }
            if last_order.is_some_and(|last| step.order <= last) {
                return Err(ConfiguratorError::invalid_schema(format!(
                    "step '{field}' has order {} which is not greater than the previous step",
                    step.order
                )));
            }
            last_order = Some(step.order);
            // The gateway question sits between the required and optional steps
            match first_optional {
                Some(optional) if step.required => {
                    return Err(ConfiguratorError::invalid_schema(format!(
                        "required step '{field}' comes after optional step '{optional}'"
                    )));
                }
                None if !step.required => first_optional = Some(field),
                _ => {}
            }
            validate_kind(field, &step.kind)?;
        }

        for step in &self.steps {
            for condition in step.visibility.iter().flat_map(|v| v.conditions()) {
                if condition.field != MORE_CUSTOMIZATION_FIELD
                    && !fields.contains(condition.field.as_str())
                {
                    return Err(ConfiguratorError::invalid_schema(format!(
                        "step '{}' depends on unknown field '{}'",
                        step.field_name, condition.field
                    )));
                }
                if condition.operator == Operator::Unsupported {
                    warn!(
                        "Step '{}' uses an unsupported condition operator and will stay hidden",
                        step.field_name
                    );
                }
            }
        }

        Ok(())
    }
}

fn validate_kind(field: &str, kind: &InputKind) -> Result<()> {
    let options = kind.options();
    if kind.is_single_choice() && !options.iter().any(|option| option.active) {
        return Err(ConfiguratorError::invalid_schema(format!(
            "choice step '{field}' has no active options"
        )));
    }
    let mut values = HashSet::new();
    for option in options {
        if !values.insert(option.value.as_str()) {
            return Err(ConfiguratorError::invalid_schema(format!(
                "step '{field}' repeats option value '{}'",
                option.value
            )));
        }
    }

    let check_range = |name: &str, min: Option<f64>, max: Option<f64>| match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ConfiguratorError::invalid_schema(format!(
            "'{name}' has a minimum of {min} above its maximum of {max}"
        ))),
        _ => Ok(()),
    };

    match kind {
        InputKind::Number { .. } | InputKind::Dimension { .. } => {
            if let Some(range) = kind.range() {
                check_range(field, range.min_value, range.max_value)?;
            }
        }
        InputKind::Checkbox {
            min_selections: Some(min),
            max_selections: Some(max),
            ..
        } if min > max => {
            return Err(ConfiguratorError::invalid_schema(format!(
                "checkbox step '{field}' requires at least {min} but at most {max} selections"
            )));
        }
        InputKind::Dimensions { measurements } => {
            if measurements.is_empty() {
                return Err(ConfiguratorError::invalid_schema(format!(
                    "dimensions step '{field}' has no measurements"
                )));
            }
            let mut keys = HashSet::new();
            for measurement in measurements {
                if !keys.insert(measurement.key.as_str()) {
                    return Err(ConfiguratorError::invalid_schema(format!(
                        "dimensions step '{field}' repeats measurement '{}'",
                        measurement.key
                    )));
                }
                check_range(
                    &format!("{field}.{}", measurement.key),
                    measurement.range.min_value,
                    measurement.range.max_value,
                )?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Listing row for the back office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfiguratorSummary {
    pub id: u64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub step_count: u64,
    pub submission_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
