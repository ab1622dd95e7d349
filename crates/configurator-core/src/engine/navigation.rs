//! Wizard session: cursor, answers and the navigation rules between them.
//!
//! The session walks a sequence of positions derived from the schema and the
//! current answers:
//!
//! ```text
//! required steps ─▶ [gateway] ─▶ optional steps (only after "yes") ─▶ contact
//! ```
//!
//! The gateway position exists only when the visible steps contain both
//! required and optional steps, and sits at the index equal to the number of
//! visible required steps. Steps keep their schema order; imported
//! definitions list required steps first, which puts the gateway between the
//! two groups. The sequence is recomputed from the answers whenever it is
//! needed, so it always reflects the latest answer set.

use log::debug;
use thiserror::Error;

use super::{
    validator::{validate, ValidationError},
    visibility::{compute_visible_steps, StepPartition},
};
use crate::models::{AnswerValue, Answers, ConfiguratorSchema, Step};

/// What the wizard is showing at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position<'a> {
    /// A schema step waiting for its answer
    Step(&'a Step),
    /// The yes/no "more customization" question
    Gateway,
    /// Contact details and submit; the terminal position
    Contact,
}

/// Why the cursor did not move forward.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    #[error("Please select an option to continue")]
    GatewayUnanswered,
    #[error("{field}: {error}")]
    Invalid {
        field: String,
        error: ValidationError,
    },
    #[error("All steps are complete")]
    AlreadyAtContact,
}

/// One user's pass through a configurator.
#[derive(Debug, Clone)]
pub struct WizardSession {
    schema: ConfiguratorSchema,
    answers: Answers,
    cursor: usize,
    error: Option<NavigationError>,
}

impl WizardSession {
    /// Starts a session at the first position.
    pub fn new(schema: ConfiguratorSchema) -> Self {
        Self::with_answers(schema, Answers::new())
    }

    /// Starts a session at the first position with answers already filled in.
    pub fn with_answers(schema: ConfiguratorSchema, answers: Answers) -> Self {
        let mut session = Self {
            schema,
            answers,
            cursor: 0,
            error: None,
        };
        session.apply_default();
        session
    }

    pub fn schema(&self) -> &ConfiguratorSchema {
        &self.schema
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The error from the last rejected advance, until the next change.
    pub fn error(&self) -> Option<&NavigationError> {
        self.error.as_ref()
    }

    /// Steps currently eligible for display, in schema order.
    pub fn visible_steps(&self) -> Vec<&Step> {
        compute_visible_steps(&self.schema.steps, &self.answers)
    }

    /// Index of the gateway question in the sequence, when there is one.
    pub fn gateway_position(&self) -> Option<usize> {
        StepPartition::new(&self.schema.steps, &self.answers).gateway_position()
    }

    /// All positions before the contact step.
    pub fn sequence(&self) -> Vec<Position<'_>> {
        let mut sequence: Vec<Position<'_>> = self
            .visible_steps()
            .into_iter()
            .map(Position::Step)
            .collect();
        // The visible steps always include every required one
        if let Some(gateway) = self.gateway_position() {
            sequence.insert(gateway, Position::Gateway);
        }
        sequence
    }

    /// Number of positions before the contact step.
    pub fn len(&self) -> usize {
        self.sequence().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self) -> Position<'_> {
        self.sequence()
            .get(self.cursor)
            .copied()
            .unwrap_or(Position::Contact)
    }

    /// True once the cursor reached the contact step.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.len()
    }

    /// Records an answer and clears any surfaced error.
    pub fn set_answer(&mut self, field: impl Into<String>, value: impl Into<AnswerValue>) {
        let field = field.into();
        debug!("Answer changed: {field}");
        let entered = self.cursor_field();
        self.answers.set(field, value);
        self.after_change(entered);
    }

    /// Removes an answer and clears any surfaced error.
    pub fn clear_answer(&mut self, field: &str) {
        let entered = self.cursor_field();
        self.answers.remove(field);
        self.after_change(entered);
    }

    /// Answers the gateway question.
    pub fn choose_more_customization(&mut self, wanted: bool) {
        debug!("Gateway answered: more customization = {wanted}");
        let entered = self.cursor_field();
        self.answers.set_more_customization(wanted);
        self.after_change(entered);
    }

    /// Moves to the next position if the current one is satisfied.
    pub fn advance(&mut self) -> Result<(), NavigationError> {
        let outcome = match self.position() {
            Position::Contact => Err(NavigationError::AlreadyAtContact),
            Position::Gateway => match self.answers.more_customization() {
                Some(_) => Ok(()),
                None => Err(NavigationError::GatewayUnanswered),
            },
            Position::Step(step) => validate(step, self.answers.get(&step.field_name))
                .map_err(|error| NavigationError::Invalid {
                    field: step.field_name.clone(),
                    error,
                }),
        };

        match outcome {
            Ok(()) => {
                self.cursor += 1;
                self.error = None;
                debug!("Advanced to position {}", self.cursor);
                self.apply_default();
                Ok(())
            }
            Err(error) => {
                debug!("Advance rejected at position {}: {error}", self.cursor);
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Moves back one position. Leaving the gateway backwards un-answers it,
    /// which hides the optional steps again; all other answers are kept.
    ///
    /// Returns false when already at the first position.
    pub fn retreat(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        if Some(self.cursor) == self.gateway_position()
            && self.answers.more_customization().is_some()
        {
            debug!("Leaving gateway backwards, clearing its answer");
            self.answers.clear_more_customization();
        }
        self.cursor -= 1;
        self.error = None;
        self.apply_default();
        true
    }

    /// Answers to submit: those of steps still in the sequence plus the
    /// gateway flag. Answers of steps hidden by a condition, or of optional
    /// steps after the gateway was declined, are left out.
    pub fn submission_answers(&self) -> Answers {
        let fields: Vec<&str> = self
            .sequence()
            .into_iter()
            .filter_map(|position| match position {
                Position::Step(step) => Some(step.field_name.as_str()),
                _ => None,
            })
            .collect();
        self.answers.retain_fields(fields)
    }

    /// Field of the step under the cursor, if the cursor is on a step.
    fn cursor_field(&self) -> Option<String> {
        match self.position() {
            Position::Step(step) => Some(step.field_name.clone()),
            _ => None,
        }
    }

    /// Clamps the cursor after an answer change. A change can put another
    /// step under the cursor, which then counts as entered.
    fn after_change(&mut self, previous: Option<String>) {
        self.error = None;
        self.cursor = self.cursor.min(self.len());
        if self.cursor_field() != previous {
            self.apply_default();
        }
    }

    /// Pre-selects the first active option of a single-choice step that has
    /// no answer yet.
    fn apply_default(&mut self) {
        let default = match self.position() {
            Position::Step(step)
                if step.is_single_choice() && self.answers.get(&step.field_name).is_none() =>
            {
                step.default_option()
                    .map(|option| (step.field_name.clone(), option.value.clone()))
            }
            _ => None,
        };
        if let Some((field, value)) = default {
            debug!("Defaulting '{field}' to '{value}'");
            self.answers.set(field, value);
        }
    }
}
