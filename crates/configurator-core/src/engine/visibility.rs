//! Visibility filtering: which steps a wizard presents for a given answer set.
//!
//! Two rules apply, in order:
//!
//! 1. A step with a visibility condition is kept only when every one of its
//!    conditions holds against the answers.
//! 2. If the kept steps contain both required and optional steps, the
//!    optional ones are behind the gateway question and only show up once
//!    the user answered it with "yes" ([`Answers::more_customization`]).
//!
//! Everything here is pure: the same steps and answers always give the same
//! ordered result, so callers recompute after every answer change.

use super::coerce::{
    answer_to_number, answer_to_text, literal_to_number, literal_to_text, strictly_equal,
};
use crate::models::{Answers, Condition, Operator, Step};

/// Condition-filtered steps split by required-ness, each in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPartition<'a> {
    pub required: Vec<&'a Step>,
    pub optional: Vec<&'a Step>,
}

impl<'a> StepPartition<'a> {
    /// Filters `steps` by their conditions and splits the survivors.
    pub fn new(steps: &'a [Step], answers: &Answers) -> Self {
        let (required, optional): (Vec<&Step>, Vec<&Step>) = steps
            .iter()
            .filter(|step| is_visible(step, answers))
            .partition(|step| step.required);
        Self { required, optional }
    }

    /// A gateway question exists when both partitions are non-empty.
    pub fn has_gateway(&self) -> bool {
        !self.required.is_empty() && !self.optional.is_empty()
    }

    /// Index of the gateway in the wizard sequence: right after the required
    /// steps.
    pub fn gateway_position(&self) -> Option<usize> {
        self.has_gateway().then_some(self.required.len())
    }
}

/// Returns the steps to present, in schema order.
pub fn compute_visible_steps<'a>(steps: &'a [Step], answers: &Answers) -> Vec<&'a Step> {
    let partition = StepPartition::new(steps, answers);
    if partition.has_gateway() && answers.more_customization() != Some(true) {
        return partition.required;
    }
    steps
        .iter()
        .filter(|step| is_visible(step, answers))
        .collect()
}

/// True when the step has no condition or all of its conditions hold.
pub fn is_visible(step: &Step, answers: &Answers) -> bool {
    step.visibility
        .as_ref()
        .map_or(true, |visibility| {
            visibility
                .conditions()
                .iter()
                .all(|condition| evaluate(condition, answers))
        })
}

/// Evaluates one condition. Unsupported operators are false.
pub fn evaluate(condition: &Condition, answers: &Answers) -> bool {
    let answer = answers.get(&condition.field);
    match condition.operator {
        Operator::Equals => answer.is_some_and(|a| strictly_equal(a, &condition.value)),
        Operator::NotEquals => !answer.is_some_and(|a| strictly_equal(a, &condition.value)),
        Operator::GreaterThan => answer_to_number(answer) > literal_to_number(&condition.value),
        Operator::LessThan => answer_to_number(answer) < literal_to_number(&condition.value),
        Operator::Contains => answer
            .is_some_and(|a| answer_to_text(a).contains(&literal_to_text(&condition.value))),
        Operator::Unsupported => false,
    }
}
