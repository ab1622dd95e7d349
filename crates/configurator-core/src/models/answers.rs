//! Answer values collected while a wizard runs.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved answer key holding the gateway choice ("more customization").
pub const MORE_CUSTOMIZATION_FIELD: &str = "_more_customization";

/// A single answer. The shape depends on the step's input kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Gateway flag and other yes/no values
    Flag(bool),
    /// `number` and `dimension` inputs
    Number(f64),
    /// Single-choice, `text` and `textarea` inputs
    Text(String),
    /// `checkbox` multi-select
    Choices(Vec<String>),
    /// `dimensions` composite input, keyed by measurement
    Measurements(BTreeMap<String, f64>),
}

impl AnswerValue {
    /// True for the values a user leaves behind by not answering: an empty
    /// string, an empty selection or an empty measurement set.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::Choices(choices) => choices.is_empty(),
            AnswerValue::Measurements(values) => values.is_empty(),
            AnswerValue::Flag(_) | AnswerValue::Number(_) => false,
        }
    }

    /// Reads the value as a number without loose coercion: numbers as-is,
    /// text only when it parses as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) if n.is_finite() => Some(*n),
            AnswerValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Selected option values for choice inputs. A single text value counts as
    /// a one-element selection.
    pub fn choices(&self) -> Vec<&str> {
        match self {
            AnswerValue::Choices(choices) => choices.iter().map(String::as_str).collect(),
            AnswerValue::Text(text) if !text.is_empty() => vec![text.as_str()],
            _ => Vec::new(),
        }
    }
}

impl Serialize for AnswerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnswerValue::Flag(flag) => serializer.serialize_bool(*flag),
            AnswerValue::Number(n) => serialize_number(*n, serializer),
            AnswerValue::Text(text) => serializer.serialize_str(text),
            AnswerValue::Choices(choices) => choices.serialize(serializer),
            AnswerValue::Measurements(values) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(values.len()))?;
                for (key, value) in values {
                    map.serialize_entry(key, &Whole(*value))?;
                }
                map.end()
            }
        }
    }
}

/// Writes integral floats as integers so `500` does not turn into `500.0`.
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

struct Whole(f64);

impl Serialize for Whole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(self.0, serializer)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value as f64)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Flag(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::Choices(value)
    }
}

impl From<BTreeMap<String, f64>> for AnswerValue {
    fn from(value: BTreeMap<String, f64>) -> Self {
        AnswerValue::Measurements(value)
    }
}

/// The answer set of one wizard session, keyed by step field name.
///
/// Serializes as a flat JSON object. `null` entries are dropped on input so
/// they read the same as a missing answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers(BTreeMap<String, AnswerValue>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<AnswerValue> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The gateway choice: `None` while unanswered.
    pub fn more_customization(&self) -> Option<bool> {
        match self.0.get(MORE_CUSTOMIZATION_FIELD) {
            Some(AnswerValue::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn set_more_customization(&mut self, wanted: bool) {
        self.0
            .insert(MORE_CUSTOMIZATION_FIELD.to_string(), AnswerValue::Flag(wanted));
    }

    pub fn clear_more_customization(&mut self) {
        self.0.remove(MORE_CUSTOMIZATION_FIELD);
    }

    /// Step answers only, without the reserved gateway key.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0
            .iter()
            .filter(|(field, _)| field.as_str() != MORE_CUSTOMIZATION_FIELD)
            .map(|(field, value)| (field.as_str(), value))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AnswerValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keeps only the given fields plus the gateway flag.
    pub fn retain_fields<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Answers {
        let keep: Vec<&str> = fields.into_iter().collect();
        Answers(
            self.0
                .iter()
                .filter(|(field, _)| {
                    field.as_str() == MORE_CUSTOMIZATION_FIELD || keep.contains(&field.as_str())
                })
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Answers(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Answers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<AnswerValue>>::deserialize(deserializer)?;
        Ok(Answers(
            raw.into_iter()
                .filter_map(|(field, value)| value.map(|value| (field, value)))
                .collect(),
        ))
    }
}
