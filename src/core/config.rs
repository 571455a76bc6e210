//! Configuration management

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Hub namespace prefix the model identifier is derived from
pub const DEFAULT_MODEL_NAMESPACE: &str = "Helsinki-NLP/opus-mt";

/// Configuration for the translation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Namespace prefix for derived model identifiers,
    /// e.g. "Helsinki-NLP/opus-mt" yields "Helsinki-NLP/opus-mt-en-fr"
    pub model_namespace: String,
    /// Maximum input length in tokens; longer input is silently truncated
    pub max_input_tokens: usize,
    /// Upper bound on generated tokens per inference pass
    pub max_output_tokens: usize,
    /// Seed for the generation sampler
    pub seed: u64,
    /// HTTP bind address
    pub host: String,
    /// HTTP listen port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_namespace: DEFAULT_MODEL_NAMESPACE.to_string(),
            max_input_tokens: 512,
            max_output_tokens: 512,
            seed: 299792458,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let model_namespace = std::env::var("HUB_MODEL_NAMESPACE")
            .unwrap_or_else(|_| DEFAULT_MODEL_NAMESPACE.to_string());

        let max_input_tokens = std::env::var("MAX_INPUT_TOKENS")
            .unwrap_or_else(|_| "512".to_string())
            .parse::<usize>()?;

        let max_output_tokens = std::env::var("MAX_OUTPUT_TOKENS")
            .unwrap_or_else(|_| "512".to_string())
            .parse::<usize>()?;

        let seed = std::env::var("GENERATION_SEED")
            .unwrap_or_else(|_| "299792458".to_string())
            .parse::<u64>()?;

        let host = std::env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("BIND_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()?;

        Ok(Self {
            model_namespace,
            max_input_tokens,
            max_output_tokens,
            seed,
            host,
            port,
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.model_namespace.is_empty() {
            return Err(anyhow::anyhow!("model_namespace is required"));
        }

        if self.max_input_tokens == 0 {
            return Err(anyhow::anyhow!("max_input_tokens must be greater than 0"));
        }

        if self.max_output_tokens == 0 {
            return Err(anyhow::anyhow!("max_output_tokens must be greater than 0"));
        }

        if self.host.is_empty() {
            return Err(anyhow::anyhow!("host is required"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model_namespace, "Helsinki-NLP/opus-mt");
    }

    #[test]
    fn test_config_validation_rejects_zero_token_limits() {
        let config = AppConfig {
            max_input_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            max_output_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = AppConfig {
            port: 9000,
            max_input_tokens: 256,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.port, 9000);
        assert_eq!(loaded.max_input_tokens, 256);
        assert_eq!(loaded.model_namespace, config.model_namespace);
    }
}
