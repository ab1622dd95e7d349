//! Localized text for step titles, option labels and descriptions.

use std::collections::BTreeMap;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Locale used when a text has no entry for the requested locale.
pub const FALLBACK_LOCALE: &str = "en";

/// Text keyed by locale code, e.g. `{"en": "Colour", "nl": "Kleur"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct LocalizedText(pub BTreeMap<String, String>);

impl LocalizedText {
    /// Creates a text with a single translation.
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self(BTreeMap::from([(locale.into(), text.into())]))
    }

    /// Adds or replaces a translation.
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(locale.into(), text.into());
        self
    }

    /// Resolves the text for `locale`, falling back to [`FALLBACK_LOCALE`]
    /// and then to the first available translation.
    pub fn resolve(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .or_else(|| self.0.get(FALLBACK_LOCALE))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }

    /// Like [`resolve`](Self::resolve) but returns `default` when no
    /// translation exists at all.
    pub fn resolve_or<'a>(&'a self, locale: &str, default: &'a str) -> &'a str {
        self.resolve(locale).unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|text| text.trim().is_empty())
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self::new(FALLBACK_LOCALE, text)
    }
}
