//! Prompts shown by interactive wizard front ends.

use std::fmt;

use crate::{
    engine::{coerce::number_to_text, Position, WizardSession},
    models::{AnswerValue, InputKind, Step},
    submit::display_value,
};

/// The question at one step, with its options and the current answer.
pub struct StepPrompt<'a> {
    pub step: &'a Step,
    pub answer: Option<&'a AnswerValue>,
    pub locale: &'a str,
    /// 1-based position and total, e.g. "Step 2 of 5"
    pub progress: (usize, usize),
}

impl fmt::Display for StepPrompt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.step;
        let locale = self.locale;
        let (current, total) = self.progress;

        writeln!(f, "## Step {current} of {total}")?;
        writeln!(f)?;
        write!(f, "**{}**", step.title.resolve_or(locale, &step.field_name))?;
        if step.required {
            write!(f, " *")?;
        }
        writeln!(f)?;
        if let Some(desc) = step.description.as_ref().and_then(|d| d.resolve(locale)) {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)?;

        for (number, option) in step.options().iter().filter(|o| o.active).enumerate() {
            let selected = self
                .answer
                .map(|answer| answer.choices().contains(&option.value.as_str()))
                .unwrap_or(false);
            writeln!(
                f,
                "{}. {}{}",
                number + 1,
                option.label.resolve_or(locale, &option.value),
                if selected { " (selected)" } else { "" }
            )?;
        }

        match &step.kind {
            InputKind::Checkbox { .. } => {
                writeln!(f)?;
                writeln!(f, "Enter numbers separated by commas.")?;
            }
            InputKind::Dimensions { measurements } => {
                let keys: Vec<&str> = measurements.iter().map(|m| m.key.as_str()).collect();
                writeln!(f, "Enter `key=value` pairs for: {}", keys.join(", "))?;
            }
            InputKind::Number { .. } | InputKind::Dimension { .. } => {
                if let Some(range) = step.kind.range() {
                    match (range.min_value, range.max_value) {
                        (Some(min), Some(max)) => writeln!(
                            f,
                            "Enter a number from {} to {}.",
                            number_to_text(min),
                            number_to_text(max)
                        )?,
                        (Some(min), None) => {
                            writeln!(f, "Enter a number of at least {}.", number_to_text(min))?
                        }
                        (None, Some(max)) => {
                            writeln!(f, "Enter a number of at most {}.", number_to_text(max))?
                        }
                        (None, None) => writeln!(f, "Enter a number.")?,
                    }
                }
            }
            _ => {}
        }

        if let Some(answer) = self.answer.filter(|a| !a.is_blank()) {
            if !step.is_single_choice() {
                writeln!(f)?;
                writeln!(f, "Current answer: {}", display_value(step, answer, locale))?;
            }
        }
        Ok(())
    }
}

/// The yes/no question placed between required and optional steps.
pub struct GatewayPrompt {
    pub optional_steps: usize,
}

impl fmt::Display for GatewayPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## More options")?;
        writeln!(f)?;
        writeln!(
            f,
            "Would you like to customize further? There are {} more questions.",
            self.optional_steps
        )?;
        writeln!(f)?;
        writeln!(f, "1. Yes, show more options")?;
        writeln!(f, "2. No, continue to contact details")
    }
}

/// Overview of the answers given so far, shown on the contact step.
pub struct AnswerOverview<'a> {
    pub session: &'a WizardSession,
    pub locale: &'a str,
}

impl fmt::Display for AnswerOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Your configuration")?;
        writeln!(f)?;
        let answers = self.session.answers();
        for step in self.session.visible_steps() {
            if let Some(value) = answers.get(&step.field_name).filter(|v| !v.is_blank()) {
                writeln!(
                    f,
                    "- **{}**: {}",
                    step.title.resolve_or(self.locale, &step.field_name),
                    display_value(step, value, self.locale)
                )?;
            }
        }
        Ok(())
    }
}

/// Renders whatever the session is currently positioned at.
pub fn render_position(session: &WizardSession, locale: &str) -> String {
    let sequence = session.sequence();
    let total = sequence.len();
    match session.position() {
        Position::Step(step) => StepPrompt {
            step,
            answer: session.answers().get(&step.field_name),
            locale,
            progress: (session.cursor() + 1, total),
        }
        .to_string(),
        Position::Gateway => GatewayPrompt {
            optional_steps: crate::engine::StepPartition::new(
                &session.schema().steps,
                session.answers(),
            )
            .optional
            .len(),
        }
        .to_string(),
        Position::Contact => AnswerOverview { session, locale }.to_string(),
    }
}
