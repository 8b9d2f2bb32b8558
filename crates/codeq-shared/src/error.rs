//! Error types for codeq

use thiserror::Error;

/// Main error type for codeq operations
#[derive(Debug, Error)]
pub enum CodeqError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("AI service error: {message}")]
    Ai { message: String },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for codeq operations
pub type Result<T> = std::result::Result<T, CodeqError>;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl From<ConfigError> for CodeqError {
    fn from(error: ConfigError) -> Self {
        CodeqError::Config {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for CodeqError {
    fn from(error: config::ConfigError) -> Self {
        CodeqError::Config {
            message: error.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CodeqError {
    fn from(error: toml::ser::Error) -> Self {
        CodeqError::Config {
            message: error.to_string(),
        }
    }
}
