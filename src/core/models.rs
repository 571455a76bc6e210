//! Core data models for translation

use serde::{Deserialize, Serialize};

use crate::core::catalog::LanguagePair;

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate; arbitrary UTF-8, possibly empty
    pub text: String,
    /// Display label of the selected pair, e.g. "English to French"
    pub language_pair: String,
}

impl TranslationRequest {
    /// Create a new translation request
    pub fn new(text: impl Into<String>, language_pair: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_pair: language_pair.into(),
        }
    }

    /// Whether the input is empty after trimming whitespace
    ///
    /// Empty input is short-circuited by the UI layers before any model
    /// invocation happens; see [`crate::core::translator::Translator`].
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Translation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Translated text
    pub translation: String,
    /// Identifier of the model that produced the translation
    pub model_id: String,
    /// Language pair the translation was produced for
    pub pair: LanguagePair,
    /// Wall-clock time of the invocation, milliseconds
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(TranslationRequest::new("", "English to French").is_blank());
        assert!(TranslationRequest::new("   \t\n ", "English to French").is_blank());
        assert!(!TranslationRequest::new(" hello ", "English to French").is_blank());
    }
}
