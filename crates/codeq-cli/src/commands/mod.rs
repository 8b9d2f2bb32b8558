//! Subcommand handlers
//!
//! - `analyze`: one-shot report for a file or stdin
//! - `watch`: debounced re-analysis on file changes
//! - `config`: effective configuration dump or save

pub mod analyze;
pub mod config;
pub mod watch;

use anyhow::{Context, Result, bail};
use codeq_core::Language;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Read the source at `path`, or stdin when `path` is `-`
pub async fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut code = String::new();
        tokio::io::stdin()
            .read_to_string(&mut code)
            .await
            .context("Failed to read stdin")?;
        return Ok(code);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Explicit language, else the one matching the file extension
pub fn resolve_language(path: &Path, explicit: Option<Language>) -> Result<Language> {
    if let Some(language) = explicit {
        return Ok(language);
    }

    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        bail!(
            "Cannot infer the language of {}; pass --language",
            path.display()
        );
    };

    match Language::from_extension(ext) {
        Some(language) => Ok(language),
        None => bail!("Unsupported file extension '.{}'; pass --language", ext),
    }
}
