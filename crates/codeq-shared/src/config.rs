//! Configuration model for codeq

use crate::error::{ConfigError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `CODEQ__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "CODEQ";

/// Main configuration structure for codeq
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeqConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// AI reviewer settings
    pub ai: AiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Allow cross-origin requests from the editor front end
    pub enable_cors: bool,

    /// Upper bound on a single request, AI call included
    pub request_timeout_seconds: u64,
}

/// AI reviewer configuration
///
/// The API key is never part of the configuration; it is read from
/// `OPENAI_API_KEY` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Whether the AI review is attempted at all
    pub enabled: bool,

    /// Model used for reviews and explanations
    pub model: String,

    /// Base URL of the chat-completions API
    pub endpoint: String,

    /// Temperature settings (0.0 - 2.0)
    pub temperature: f32,

    /// Maximum tokens for a review
    pub max_tokens: u32,

    /// Timeout for requests in seconds
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for CodeqConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ai: AiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
            request_timeout_seconds: 60,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
            temperature: 0.3,
            max_tokens: 1500,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl CodeqConfig {
    /// Defaults overlaid with `CODEQ__*` environment variables
    pub fn load_with_env() -> Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(Self::env_source())
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with a TOML file, then the environment
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .add_source(Self::env_source())
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port", self.server.port));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(invalid(
                "server.request_timeout_seconds",
                self.server.request_timeout_seconds,
            ));
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(invalid("ai.temperature", self.ai.temperature));
        }
        if self.ai.max_tokens == 0 {
            return Err(invalid("ai.max_tokens", self.ai.max_tokens));
        }
        if self.ai.timeout_seconds == 0 {
            return Err(invalid("ai.timeout_seconds", self.ai.timeout_seconds));
        }
        if self.ai.enabled && self.ai.model.trim().is_empty() {
            return Err(invalid("ai.model", "<empty>"));
        }
        Ok(())
    }

    fn env_source() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }
}

fn invalid(key: &str, value: impl std::fmt::Display) -> crate::error::CodeqError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = CodeqConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.max_tokens, 1500);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CodeqConfig::default();
        config.ai.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = CodeqConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = CodeqConfig::default();
        config.ai.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codeq.toml");
        std::fs::write(&path, "[server]\nport = 9100\n\n[ai]\nenabled = false\n").unwrap();

        let config = CodeqConfig::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.ai.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = CodeqConfig::load_from_file(&temp_dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved.toml");

        let mut config = CodeqConfig::default();
        config.logging.json = true;
        config.save_to_file(&path).unwrap();

        let loaded = CodeqConfig::load_from_file(&path).unwrap();
        assert!(loaded.logging.json);
    }
}
