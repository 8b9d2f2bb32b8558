//! # codeq Shared
//!
//! Shared types, errors and configuration for codeq.
//! This crate provides the foundation types used across all codeq components.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use self::config::*;
pub use self::error::*;
pub use self::types::*;

/// Version information for codeq
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
