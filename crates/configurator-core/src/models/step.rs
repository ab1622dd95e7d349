//! Step model: one question of a configurator, bound to one answer field.

use std::fmt;

use regex::Regex;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{LocalizedText, Visibility};

/// One question/screen of the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Presentation order; strictly increasing within a configurator
    pub order: u32,

    /// Key of this step's answer in the answer set
    pub field_name: String,

    /// Question shown to the user
    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,

    /// Required steps are always asked; optional steps sit behind the gateway
    #[serde(default)]
    pub required: bool,

    #[serde(
        default,
        rename = "visibilityCondition",
        skip_serializing_if = "Option::is_none"
    )]
    pub visibility: Option<Visibility>,

    /// Input kind with its kind-specific settings
    #[serde(flatten)]
    pub kind: InputKind,
}

impl Step {
    /// Options of choice inputs; empty for every other kind.
    pub fn options(&self) -> &[StepOption] {
        self.kind.options()
    }

    /// First active option, used as the auto-selected default.
    pub fn default_option(&self) -> Option<&StepOption> {
        self.options().iter().find(|option| option.active)
    }

    /// Looks up an active option by value.
    pub fn option(&self, value: &str) -> Option<&StepOption> {
        self.options()
            .iter()
            .find(|option| option.active && option.value == value)
    }

    pub fn is_single_choice(&self) -> bool {
        self.kind.is_single_choice()
    }

    pub fn input_type(&self) -> &'static str {
        self.kind.input_type()
    }
}

/// The nine input kinds, each carrying only the settings it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(
    tag = "inputType",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum InputKind {
    RadioImage {
        #[serde(default)]
        options: Vec<StepOption>,
    },
    Radio {
        #[serde(default)]
        options: Vec<StepOption>,
    },
    Select {
        #[serde(default)]
        options: Vec<StepOption>,
    },
    Checkbox {
        #[serde(default)]
        options: Vec<StepOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_selections: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_selections: Option<u32>,
    },
    Text {
        #[serde(
            default,
            rename = "validationPattern",
            skip_serializing_if = "Option::is_none"
        )]
        pattern: Option<Pattern>,
    },
    Textarea,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step_value: Option<f64>,
    },
    Dimension {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    Dimensions {
        #[serde(default)]
        measurements: Vec<Measurement>,
    },
}

impl InputKind {
    pub fn options(&self) -> &[StepOption] {
        match self {
            InputKind::RadioImage { options }
            | InputKind::Radio { options }
            | InputKind::Select { options }
            | InputKind::Checkbox { options, .. } => options,
            _ => &[],
        }
    }

    /// Kinds that hold exactly one option value and get auto-defaulted.
    pub fn is_single_choice(&self) -> bool {
        matches!(
            self,
            InputKind::RadioImage { .. } | InputKind::Radio { .. } | InputKind::Select { .. }
        )
    }

    pub fn is_choice(&self) -> bool {
        self.is_single_choice() || matches!(self, InputKind::Checkbox { .. })
    }

    /// Numeric bounds of `number` and `dimension` inputs.
    pub fn range(&self) -> Option<NumberRange> {
        match *self {
            InputKind::Number {
                min_value,
                max_value,
                step_value,
            }
            | InputKind::Dimension {
                min_value,
                max_value,
                step_value,
                ..
            } => Some(NumberRange {
                min_value,
                max_value,
                step_value,
            }),
            _ => None,
        }
    }

    /// Wire name of the kind, as stored in definitions and the database.
    pub fn input_type(&self) -> &'static str {
        match self {
            InputKind::RadioImage { .. } => "radioImage",
            InputKind::Radio { .. } => "radio",
            InputKind::Select { .. } => "select",
            InputKind::Checkbox { .. } => "checkbox",
            InputKind::Text { .. } => "text",
            InputKind::Textarea => "textarea",
            InputKind::Number { .. } => "number",
            InputKind::Dimension { .. } => "dimension",
            InputKind::Dimensions { .. } => "dimensions",
        }
    }
}

/// Bounds and increment for numeric inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct NumberRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_value: Option<f64>,
}

impl NumberRange {
    pub fn new(min_value: Option<f64>, max_value: Option<f64>) -> Self {
        Self {
            min_value,
            max_value,
            step_value: None,
        }
    }
}

/// One sub-measurement of a `dimensions` step (e.g. width, depth).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Key inside the answer's measurement map
    pub key: String,
    #[serde(default)]
    pub label: LocalizedText,
    #[serde(flatten)]
    pub range: NumberRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A selectable choice of a choice step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StepOption {
    /// Stored answer value; unique within the step
    pub value: String,
    pub label: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl StepOption {
    pub fn new(value: impl Into<String>, label: impl Into<LocalizedText>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            image_url: None,
            display_order: 0,
            active: true,
        }
    }
}

/// A compiled validation pattern that serializes as its source string.
///
/// Matching is unanchored: the pattern must occur somewhere in the value.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "schema")]
impl JsonSchema for Pattern {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Pattern".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "regex"
        })
    }
}
