//! Language pair catalog and label resolution

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TranslateError};

/// Built-in language pairs: (display label, source code, target code).
///
/// Every entry must correspond to an actually-hosted pretrained model for
/// that code combination, or first invocation of the pair fails.
const DEFAULT_PAIRS: &[(&str, &str, &str)] = &[
    ("English to French", "en", "fr"),
    ("French to English", "fr", "en"),
    ("English to German", "en", "de"),
    ("German to English", "de", "en"),
    ("English to Spanish", "en", "es"),
    ("Spanish to English", "es", "en"),
    ("English to Italian", "en", "it"),
    ("Italian to English", "it", "en"),
    ("English to Russian", "en", "ru"),
    ("Russian to English", "ru", "en"),
    ("English to Chinese", "en", "zh"),
    ("Chinese to English", "zh", "en"),
    ("English to Japanese", "en", "ja"),
    ("Japanese to English", "ja", "en"),
    ("English to Arabic", "en", "ar"),
    ("Arabic to English", "ar", "en"),
];

/// An ordered (source, target) combination identifying one translation direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Short ISO-like source language code
    pub source: String,
    /// Short ISO-like target language code
    pub target: String,
}

impl LanguagePair {
    /// Create a new language pair
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Ordered, immutable mapping from display label to language pair
#[derive(Debug, Clone)]
pub struct LanguagePairCatalog {
    /// Entries in insertion order; labels are unique
    entries: Vec<(String, LanguagePair)>,
}

impl Default for LanguagePairCatalog {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_PAIRS
                .iter()
                .map(|(label, src, tgt)| (label.to_string(), LanguagePair::new(*src, *tgt))),
        )
    }
}

impl LanguagePairCatalog {
    /// Build a catalog from (label, pair) entries, preserving order
    pub fn from_entries(entries: impl IntoIterator<Item = (String, LanguagePair)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Resolve a display label to its language pair
    ///
    /// Unknown labels fail with [`TranslateError::InvalidSelection`]. The
    /// bundled UI layers only offer known labels; the error path exists for
    /// library callers passing arbitrary strings.
    pub fn resolve(&self, label: &str) -> Result<&LanguagePair> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, pair)| pair)
            .ok_or_else(|| TranslateError::InvalidSelection {
                label: label.to_string(),
            })
    }

    /// Display labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Iterate over (label, pair) entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LanguagePair)> {
        self.entries.iter().map(|(label, pair)| (label.as_str(), pair))
    }

    /// Number of catalog entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
