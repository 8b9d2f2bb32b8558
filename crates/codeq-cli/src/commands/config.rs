//! Effective configuration dump

use anyhow::Result;
use codeq_core::ConfigManager;
use codeq_core::config::API_KEY_ENV;
use std::path::Path;

pub async fn run(manager: &ConfigManager, key: Option<&str>, save: Option<&Path>) -> Result<()> {
    match (key, save) {
        (Some(key), _) => println!("{}", manager.get_value(key).await?),
        (None, Some(path)) => {
            manager.save_to_file(path).await?;
            println!("Configuration written to {}", path.display());
        }
        (None, None) => print!("{}", render(manager).await?),
    }
    Ok(())
}

/// TOML with provenance comments; the API key itself is never printed
async fn render(manager: &ConfigManager) -> Result<String> {
    let source = match manager.config_path() {
        Some(path) => path.display().to_string(),
        None => "defaults and environment".to_string(),
    };
    let key_state = if manager.api_key().is_some() { "set" } else { "not set" };

    Ok(format!(
        "# Loaded from: {}\n# {}: {}\n\n{}",
        source,
        API_KEY_ENV,
        key_state,
        manager.get_config().await.to_toml()?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeq_core::CodeqConfig;

    #[tokio::test]
    async fn test_render_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codeq.toml");
        std::fs::write(&path, "[server]\nport = 9100\n\n[ai]\nmodel = \"gpt-4o\"\n").unwrap();

        let manager = ConfigManager::from_file(&path).await.unwrap();
        let text = render(&manager).await.unwrap();

        assert!(text.starts_with(&format!("# Loaded from: {}\n", path.display())));
        assert!(text.contains("port = 9100"));
        assert!(text.contains("model = \"gpt-4o\""));
    }

    #[tokio::test]
    async fn test_save_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("codeq.toml");

        let mut config = CodeqConfig::default();
        config.ai.model = "gpt-4o".to_string();
        let manager = ConfigManager::new(config);
        run(&manager, None, Some(&path)).await.unwrap();

        let loaded = ConfigManager::from_file(&path).await.unwrap();
        assert_eq!(loaded.get_value("ai.model").await.unwrap(), "gpt-4o");
    }

    #[tokio::test]
    async fn test_render_defaults() {
        let manager = ConfigManager::new(CodeqConfig::default());
        let text = render(&manager).await.unwrap();

        assert!(text.starts_with("# Loaded from: defaults and environment\n"));
        assert!(text.contains("[server]"));
        assert!(text.contains("[logging]"));
    }
}
