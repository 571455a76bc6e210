//! Translation facade combining catalog resolution, the handle cache and
//! model invocation

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::core::cache::ModelHandleCache;
use crate::core::catalog::{LanguagePair, LanguagePairCatalog};
use crate::core::errors::Result;
use crate::core::models::TranslationResult;
use crate::engine::ModelEngine;

/// Translation entry point shared by the HTTP server and the CLI
///
/// Holds the immutable pair catalog and the process-wide handle cache. All
/// request state is ephemeral; cloning is cheap and every clone shares the
/// same cache.
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<LanguagePairCatalog>,
    cache: Arc<ModelHandleCache>,
}

impl Translator {
    /// Create a translator over `engine` with the built-in catalog
    pub fn new(engine: Arc<dyn ModelEngine>) -> Self {
        Self::with_catalog(engine, LanguagePairCatalog::default())
    }

    /// Create a translator with a custom catalog
    pub fn with_catalog(engine: Arc<dyn ModelEngine>, catalog: LanguagePairCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cache: Arc::new(ModelHandleCache::new(engine)),
        }
    }

    /// The language pair catalog
    pub fn catalog(&self) -> &LanguagePairCatalog {
        &self.catalog
    }

    /// Translate `text` for a resolved language pair
    ///
    /// Callers are expected to reject input that is empty after trimming
    /// before invoking this; the guard belongs to the UI layers and is not
    /// duplicated here.
    pub async fn translate_pair(&self, text: &str, pair: &LanguagePair) -> Result<TranslationResult> {
        let started = Instant::now();

        let handle = self.cache.get_handle(pair).await?;
        debug!("Using model {} for pair {}", handle.model_id(), pair);

        let translation = handle.translate(text).await?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            "Translated {} chars via {} in {}ms",
            text.chars().count(),
            handle.model_id(),
            elapsed_ms
        );

        Ok(TranslationResult {
            translation,
            model_id: handle.model_id().to_string(),
            pair: pair.clone(),
            elapsed_ms,
        })
    }

    /// Resolve a display label and translate `text` for the resulting pair
    pub async fn translate(&self, text: &str, label: &str) -> Result<TranslationResult> {
        let pair = self.catalog.resolve(label)?.clone();
        self.translate_pair(text, &pair).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::TranslateError;
    use crate::engine::testing::MockEngine;

    fn translator_with_engine() -> (Arc<MockEngine>, Translator) {
        let engine = Arc::new(MockEngine::new());
        let translator = Translator::new(engine.clone());
        (engine, translator)
    }

    #[tokio::test]
    async fn test_translate_by_label() {
        let (engine, translator) = translator_with_engine();

        let result = translator.translate("hello", "English to French").await.unwrap();
        assert_eq!(result.model_id, "Helsinki-NLP/opus-mt-en-fr");
        assert_eq!(result.pair, LanguagePair::new("en", "fr"));
        assert!(!result.translation.is_empty());
        assert_ne!(result.translation, "hello");
        assert_eq!(engine.load_count(), 1);
        assert_eq!(engine.translation_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_label_is_rejected_before_any_load() {
        let (engine, translator) = translator_with_engine();

        let err = translator.translate("hello", "Klingon to English").await.unwrap_err();
        assert!(matches!(err, TranslateError::InvalidSelection { .. }));
        assert_eq!(engine.load_count(), 0);
    }

    #[tokio::test]
    async fn test_repeat_translations_reuse_the_cached_handle() {
        let (engine, translator) = translator_with_engine();

        translator.translate("good morning", "English to German").await.unwrap();
        translator.translate("good night", "English to German").await.unwrap();

        assert_eq!(engine.load_count(), 1);
        assert_eq!(engine.translation_count(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_pair_surfaces_model_unavailable() {
        let (_engine, translator) = translator_with_engine();

        let err = translator
            .translate_pair("hello", &LanguagePair::new("en", "xx"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::ModelUnavailable { .. }));
    }
}
