//! Localized display strings.
//!
//! Each template carries at most one `{string}` placeholder. There is no
//! fallback chain: a key missing for the requested language is an error.

use std::collections::HashMap;

use crate::error::{CloudError, Result};

const PLACEHOLDER: &str = "{string}";

/// language → key → template
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    languages: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in English strings.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert("en", "stats_title", "Information on topic \"{string}\":");
        catalog.insert("en", "total_mentions", "Total Mentions: {string}");
        catalog.insert("en", "positive_mentions", "Positive Mentions: {string}");
        catalog.insert("en", "neutral_mentions", "Neutral Mentions: {string}");
        catalog.insert("en", "negative_mentions", "Negative Mentions: {string}");
        catalog
    }

    pub fn insert(
        &mut self,
        language: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.languages
            .entry(language.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Raw template for `key`.
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    /// Template for `key` with the first `{string}` replaced by `data`.
    pub fn format(&self, language: &str, key: &str, data: Option<&str>) -> Result<String> {
        let template = self
            .get(language, key)
            .ok_or_else(|| CloudError::TranslationMissing {
                key: key.to_string(),
                language: language.to_string(),
            })?;

        Ok(match data {
            Some(data) if template.contains(PLACEHOLDER) => template.replacen(PLACEHOLDER, data, 1),
            _ => template.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_first_placeholder_only() {
        let mut c = Catalog::new();
        c.insert("en", "k", "{string} and {string}");
        assert_eq!(c.format("en", "k", Some("x")).unwrap(), "x and {string}");
    }

    #[test]
    fn template_without_placeholder_ignores_data() {
        let mut c = Catalog::new();
        c.insert("en", "k", "static");
        assert_eq!(c.format("en", "k", Some("x")).unwrap(), "static");
        assert_eq!(
            Catalog::builtin().format("en", "total_mentions", None).unwrap(),
            "Total Mentions: {string}"
        );
    }

    #[test]
    fn missing_key_or_language_is_an_error() {
        let c = Catalog::builtin();
        let err = c.format("en", "nope", None).unwrap_err();
        assert!(matches!(err, CloudError::TranslationMissing { ref key, .. } if key == "nope"));

        // No fallback to English.
        let err = c.format("fr", "total_mentions", Some("3")).unwrap_err();
        assert!(matches!(err, CloudError::TranslationMissing { ref language, .. } if language == "fr"));
    }
}
