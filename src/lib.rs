//! TransLingua - self-hosted multi-language translation service
//!
//! Resolves human-readable language pair labels to pretrained MarianMT
//! models, caches loaded (tokenizer, model) handles process-wide, and runs
//! local inference behind an HTTP API and a one-shot CLI. Session-scoped
//! extras (scratch notepad, vocabulary quiz) live alongside the translation
//! core.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod core;
pub mod engine;
pub mod server;
pub mod session;

// Re-export key types for convenience
pub use crate::core::{
    catalog::{LanguagePair, LanguagePairCatalog},
    config::AppConfig,
    errors::TranslateError,
    models::{TranslationRequest, TranslationResult},
    translator::Translator,
};

pub use crate::engine::{marian::MarianEngine, ModelEngine, ModelHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
