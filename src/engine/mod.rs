//! Model engine boundary
//!
//! The engine is the seam to the external model repository: it turns a
//! language pair into a loaded, ready-to-use handle. The bundled
//! implementation ([`marian::MarianEngine`]) downloads MarianMT artifacts
//! from the HuggingFace hub and runs local inference with candle.

pub mod marian;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::catalog::LanguagePair;
use crate::core::errors::Result;

/// Provider of loaded model handles, one per language pair
#[async_trait]
pub trait ModelEngine: Send + Sync {
    /// Construct the handle for a pair
    ///
    /// May block for a long time on first access for a pair (network fetch
    /// plus model deserialization). Failures surface as
    /// [`crate::core::errors::TranslateError::ModelUnavailable`].
    async fn load(&self, pair: &LanguagePair) -> Result<Arc<dyn ModelHandle>>;
}

/// A loaded (tokenizer, model) pair for exactly one language pair
#[async_trait]
pub trait ModelHandle: Send + Sync + std::fmt::Debug {
    /// Identifier of the hosted artifact bundle this handle was built from
    fn model_id(&self) -> &str;

    /// Run one inference pass over `text`
    ///
    /// Encodes with padding and truncation enabled (overflow beyond the
    /// model's maximum input length is silently dropped), generates a token
    /// sequence, and decodes it skipping special tokens. Output is not
    /// guaranteed to be deterministic across model or decoder versions.
    async fn translate(&self, text: &str) -> Result<String>;
}
