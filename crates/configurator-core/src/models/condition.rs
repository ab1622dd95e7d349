//! Visibility conditions attached to steps.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied between an answer and a condition value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    /// Any operator name this engine does not know. Always evaluates false.
    #[serde(other)]
    Unsupported,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::Contains => "contains",
            Operator::Unsupported => "unsupported",
        }
    }
}

/// A single `field <operator> value` test against the answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Condition {
    /// Field name of the answer to test (may be the gateway flag)
    pub field: String,
    pub operator: Operator,
    /// Literal to compare against; any JSON value
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// A step's visibility rule: one condition, or a list that must all hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum Visibility {
    All(Vec<Condition>),
    Single(Condition),
}

impl Visibility {
    pub fn conditions(&self) -> &[Condition] {
        match self {
            Visibility::All(conditions) => conditions,
            Visibility::Single(condition) => std::slice::from_ref(condition),
        }
    }
}

impl From<Condition> for Visibility {
    fn from(condition: Condition) -> Self {
        Visibility::Single(condition)
    }
}

impl From<Vec<Condition>> for Visibility {
    fn from(conditions: Vec<Condition>) -> Self {
        Visibility::All(conditions)
    }
}
