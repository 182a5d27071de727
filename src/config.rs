//! Configuration for the neuroquery CLI and pipeline.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub schema: SchemaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            schema: SchemaConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("neuroquery.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("neuroquery/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".neuroquery/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.extractor.base_url.is_empty() {
            return Err(ConfigError::MissingField("extractor.base_url".to_string()).into());
        }
        if self.extractor.model.is_empty() {
            return Err(ConfigError::MissingField("extractor.model".to_string()).into());
        }
        if self.extractor.timeout_secs == 0 {
            return Err(ConfigError::Invalid("extractor.timeout_secs must be > 0".to_string()).into());
        }
        Ok(())
    }

    /// Expand the schema file path, if one is configured.
    pub fn schema_path(&self) -> Option<PathBuf> {
        self.schema
            .path
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
    }
}

/// Natural-language-understanding collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Base URL for the chat-completions API
    pub base_url: String,
    /// Model name
    pub model: String,
    /// API key (loaded from environment if not set)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Run an entity-summary pre-pass before the structured-query call
    pub two_pass: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1-nano-2025-04-14".to_string(),
            api_key: None,
            timeout_secs: 30,
            two_pass: true,
        }
    }
}

/// Schema source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Path to a TOML schema file. When unset, the built-in lab schema is used.
    pub path: Option<String>,
}
