//! Configuration Management
//!
//! This module handles the runtime side of codeq configuration:
//! - Discovering and loading configuration files
//! - Environment variable integration
//! - API key management

use codeq_shared::{CodeqConfig, CodeqError, Result};
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Environment variable holding the OpenAI API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration manager for codeq
pub struct ConfigManager {
    /// Current configuration
    config: Arc<RwLock<CodeqConfig>>,

    /// Configuration file path
    config_path: Option<PathBuf>,

    /// API key (never part of the serialized configuration)
    api_key: Option<SecretString>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new(config: CodeqConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_path: None,
            api_key: load_api_key(),
        }
    }

    /// Create configuration manager from file
    #[instrument]
    pub async fn from_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let config = CodeqConfig::load_from_file(path)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path: Some(path.to_path_buf()),
            api_key: load_api_key(),
        })
    }

    /// Create with automatic configuration discovery
    #[instrument]
    pub async fn auto_discover() -> Result<Self> {
        debug!("Auto-discovering configuration");

        for path in Self::search_paths() {
            if path.exists() {
                debug!("Found configuration at: {}", path.display());
                return Self::from_file(path).await;
            }
        }

        debug!("No configuration file found, using defaults and environment");
        Ok(Self::new(CodeqConfig::load_with_env()?))
    }

    /// Get current configuration (read-only)
    pub async fn get_config(&self) -> CodeqConfig {
        self.config.read().await.clone()
    }

    /// Path the configuration was loaded from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// API key read from the environment
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    /// Save current configuration to file
    #[instrument(skip(self))]
    pub async fn save_to_file<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving configuration to: {}", path.display());

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        self.config.read().await.save_to_file(path)?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Get configuration value by dot-separated key path
    pub async fn get_value(&self, key_path: &str) -> Result<String> {
        let config = self.config.read().await;
        extract_value_by_path(&config, key_path).ok_or_else(|| CodeqError::Config {
            message: format!("Unsupported configuration path: {}", key_path),
        })
    }

    /// Configuration search paths, in order of preference
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./codeq.toml"),
            PathBuf::from("./config/codeq.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("codeq").join("codeq.toml"));
        }
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".codeq.toml"));
        }

        paths
    }
}

/// Read the API key from the environment, ignoring blank values
pub fn load_api_key() -> Option<SecretString> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Some(SecretString::from(key)),
        Ok(_) => {
            warn!("{} is set but empty", API_KEY_ENV);
            None
        }
        Err(_) => None,
    }
}

fn extract_value_by_path(config: &CodeqConfig, key_path: &str) -> Option<String> {
    let parts: Vec<&str> = key_path.split('.').collect();

    let value = match parts.as_slice() {
        ["server", "host"] => config.server.host.clone(),
        ["server", "port"] => config.server.port.to_string(),
        ["server", "enable_cors"] => config.server.enable_cors.to_string(),
        ["server", "request_timeout_seconds"] => config.server.request_timeout_seconds.to_string(),
        ["ai", "enabled"] => config.ai.enabled.to_string(),
        ["ai", "model"] => config.ai.model.clone(),
        ["ai", "endpoint"] => config.ai.endpoint.clone(),
        ["ai", "temperature"] => config.ai.temperature.to_string(),
        ["ai", "max_tokens"] => config.ai.max_tokens.to_string(),
        ["ai", "timeout_seconds"] => config.ai.timeout_seconds.to_string(),
        ["logging", "level"] => config.logging.level.clone(),
        ["logging", "json"] => config.logging.json.to_string(),
        _ => return None,
    };

    Some(value)
}
