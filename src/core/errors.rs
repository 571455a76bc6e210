//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Label is not present in the language pair catalog
    #[error("Unknown language pair: {label}")]
    InvalidSelection {
        label: String,
    },

    /// The model hub cannot supply artifacts for a language pair
    #[error("Model unavailable: {model_id} - {message}")]
    ModelUnavailable {
        model_id: String,
        message: String,
    },

    /// Input text could not be tokenized
    #[error("Encoding failure: {message}")]
    EncodingFailure {
        message: String,
    },

    /// The generation pass failed
    #[error("Inference failure: {message}")]
    InferenceFailure {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslateError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TranslateError::InvalidSelection { .. } => "invalid_selection",
            TranslateError::ModelUnavailable { .. } => "model_unavailable",
            TranslateError::EncodingFailure { .. } => "encoding_failure",
            TranslateError::InferenceFailure { .. } => "inference_failure",
            TranslateError::ConfigError { .. } => "config_error",
            TranslateError::IoError(_) => "io_error",
            TranslateError::JsonError(_) => "json_error",
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;
