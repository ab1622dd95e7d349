//! Markdown display for domain models.
//!
//! Models without translatable text implement [`fmt::Display`] directly.
//! Schemas and submissions carry localized labels, so they are shown through
//! wrappers that hold the locale to resolve them in.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    engine::coerce::{literal_to_text, number_to_text},
    models::{
        AppointmentSelection, Condition, ConfiguratorSchema, ConfiguratorSummary, ContactInfo,
        InputKind, NumberRange, Step, Submission, SubmissionStatus, MORE_CUSTOMIZATION_FIELD,
    },
    submit::display_value,
};

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` {} \"{}\"",
            self.field,
            self.operator.as_str(),
            literal_to_text(&self.value)
        )
    }
}

impl fmt::Display for ConfiguratorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {}, slug: `{}`)", self.name, self.id, self.slug)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(f, "- **Steps**: {}", self.step_count)?;
        writeln!(f, "- **Submissions**: {}", self.submission_count)?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Submission {} ({})", self.id, self.status)?;
        writeln!(f)?;
        writeln!(f, "- **Configurator**: {}", self.configurator_id)?;
        writeln!(
            f,
            "- **Contact**: {} <{}>, {}",
            self.contact.name, self.contact.email, self.contact.phone
        )?;
        if self.appointment.wanted {
            writeln!(f, "- **Appointment**: requested")?;
        }
        writeln!(f, "- **Submitted**: {}", LocalDateTime(&self.submitted_at))?;
        writeln!(f)
    }
}

fn range_text(range: &NumberRange, unit: Option<&str>) -> Option<String> {
    let unit = unit.map(|u| format!(" {u}")).unwrap_or_default();
    match (range.min_value, range.max_value) {
        (Some(min), Some(max)) => Some(format!(
            "{} - {}{unit}",
            number_to_text(min),
            number_to_text(max)
        )),
        (Some(min), None) => Some(format!("at least {}{unit}", number_to_text(min))),
        (None, Some(max)) => Some(format!("at most {}{unit}", number_to_text(max))),
        (None, None) => None,
    }
}

/// A configurator definition with its steps, resolved in one locale.
pub struct SchemaDetails<'a> {
    pub schema: &'a ConfiguratorSchema,
    pub locale: &'a str,
}

impl<'a> SchemaDetails<'a> {
    pub fn new(schema: &'a ConfiguratorSchema, locale: &'a str) -> Self {
        Self { schema, locale }
    }

    fn fmt_step(&self, step: &Step, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locale = self.locale;
        writeln!(
            f,
            "### {}. {} (`{}`, {}, {})",
            step.order,
            step.title.resolve_or(locale, &step.field_name),
            step.field_name,
            step.input_type(),
            if step.required { "required" } else { "optional" }
        )?;
        writeln!(f)?;

        if let Some(desc) = step.description.as_ref().and_then(|d| d.resolve(locale)) {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        for option in step.options() {
            writeln!(
                f,
                "- `{}` {}",
                option.value,
                option.label.resolve_or(locale, &option.value)
            )?;
        }

        match &step.kind {
            InputKind::Checkbox {
                min_selections,
                max_selections,
                ..
            } => {
                if let Some(min) = min_selections {
                    writeln!(f, "- Select at least {min}")?;
                }
                if let Some(max) = max_selections {
                    writeln!(f, "- Select at most {max}")?;
                }
            }
            InputKind::Text {
                pattern: Some(pattern),
            } => writeln!(f, "- Format: `{}`", pattern.as_str())?,
            InputKind::Number { .. } | InputKind::Dimension { .. } => {
                let unit = match &step.kind {
                    InputKind::Dimension { unit, .. } => unit.as_deref(),
                    _ => None,
                };
                if let Some(range) = step.kind.range().and_then(|r| range_text(&r, unit)) {
                    writeln!(f, "- Range: {range}")?;
                }
            }
            InputKind::Dimensions { measurements } => {
                for measurement in measurements {
                    let label = measurement.label.resolve_or(locale, &measurement.key);
                    match range_text(&measurement.range, measurement.unit.as_deref()) {
                        Some(range) => writeln!(f, "- {label} (`{}`): {range}", measurement.key)?,
                        None => writeln!(f, "- {label} (`{}`)", measurement.key)?,
                    }
                }
            }
            _ => {}
        }

        if let Some(visibility) = &step.visibility {
            let conditions: Vec<String> = visibility
                .conditions()
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(f, "- Shown when: {}", conditions.join(" and "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for SchemaDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = self.schema;
        writeln!(f, "# {} (ID: {})", schema.name, schema.id)?;
        writeln!(f)?;
        writeln!(f, "- Slug: `{}`", schema.slug)?;
        writeln!(f, "- Steps: {}", schema.steps.len())?;

        if let Some(desc) = &schema.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for step in &schema.steps {
            self.fmt_step(step, f)?;
        }
        Ok(())
    }
}

/// A full submission. Answers are labelled through the configurator when it
/// still exists and shown raw otherwise.
pub struct SubmissionDetails<'a> {
    pub submission: &'a Submission,
    pub schema: Option<&'a ConfiguratorSchema>,
}

impl<'a> SubmissionDetails<'a> {
    pub fn new(submission: &'a Submission, schema: Option<&'a ConfiguratorSchema>) -> Self {
        Self { submission, schema }
    }

    fn fmt_answers(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locale = self.submission.locale.as_str();
        for (field, value) in self.submission.answers.fields() {
            match self.schema.and_then(|schema| schema.step(field)) {
                Some(step) => writeln!(
                    f,
                    "- **{}**: {}",
                    step.title.resolve_or(locale, field),
                    display_value(step, value, locale)
                )?,
                None => writeln!(
                    f,
                    "- **{field}**: {}",
                    crate::engine::coerce::answer_to_text(value)
                )?,
            }
        }
        if let Some(more) = self.submission.answers.more_customization() {
            writeln!(
                f,
                "- **More customization** (`{MORE_CUSTOMIZATION_FIELD}`): {}",
                if more { "yes" } else { "no" }
            )?;
        }
        Ok(())
    }
}

fn fmt_contact(contact: &ContactInfo, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "- Name: {}", contact.name)?;
    writeln!(f, "- Email: {}", contact.email)?;
    writeln!(f, "- Phone: {}", contact.phone)?;
    for (label, value) in [
        ("Address", &contact.address),
        ("City", &contact.city),
        ("Notes", &contact.notes),
    ] {
        if let Some(value) = value {
            writeln!(f, "- {label}: {value}")?;
        }
    }
    Ok(())
}

fn fmt_appointment(appointment: &AppointmentSelection, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !appointment.wanted {
        return writeln!(f, "Not requested.");
    }
    if let Some(service) = &appointment.service_type {
        writeln!(f, "- Service: {service}")?;
    }
    writeln!(f, "- Date: {}", appointment.date.as_deref().unwrap_or("-"))?;
    writeln!(f, "- Time: {}", appointment.time.as_deref().unwrap_or("-"))
}

impl fmt::Display for SubmissionDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let submission = self.submission;
        writeln!(f, "# Submission {}", submission.id)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", submission.status)?;
        match self.schema {
            Some(schema) => writeln!(f, "- Configurator: {} (`{}`)", schema.name, schema.slug)?,
            None => writeln!(f, "- Configurator: {} (deleted)", submission.configurator_id)?,
        }
        writeln!(f, "- Locale: {}", submission.locale)?;
        writeln!(f, "- Submitted: {}", LocalDateTime(&submission.submitted_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&submission.updated_at))?;

        writeln!(f, "\n## Answers")?;
        writeln!(f)?;
        self.fmt_answers(f)?;

        writeln!(f, "\n## Contact")?;
        writeln!(f)?;
        fmt_contact(&submission.contact, f)?;

        writeln!(f, "\n## Appointment")?;
        writeln!(f)?;
        fmt_appointment(&submission.appointment, f)
    }
}
