//! codeq command-line entry point

mod commands;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codeq_core::{CodeAnalyzer, CodeqConfig, ConfigManager, Language, LoggingConfig, QualityEngine};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codeq", version)]
#[command(about = "codeq - heuristic code quality analyzer with optional AI review")]
struct Cli {
    /// Configuration file; discovered when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, help = "Address to bind, overrides the configuration")]
        host: Option<String>,
        #[arg(short, long, help = "Port to bind, overrides the configuration")]
        port: Option<u16>,
    },

    /// Analyze a file, or stdin with `-`
    Analyze {
        file: PathBuf,
        #[arg(short, long, help = "Language tag; inferred from the extension when omitted")]
        language: Option<Language>,
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
        #[arg(long, help = "Skip the AI review")]
        no_ai: bool,
    },

    /// Re-analyze a file whenever it changes
    Watch {
        file: PathBuf,
        #[arg(short, long, help = "Language tag; inferred from the extension when omitted")]
        language: Option<Language>,
    },

    /// Print the effective configuration
    Config {
        #[arg(long, value_name = "KEY", help = "Print a single value, e.g. ai.model")]
        get: Option<String>,
        #[arg(long, value_name = "PATH", conflicts_with = "get", help = "Write the effective configuration to a TOML file")]
        save: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::from_file(path).await?,
        None => ConfigManager::auto_discover().await?,
    };
    let mut config = manager.get_config().await;
    init_tracing(&config.logging);
    debug!(path = ?manager.config_path(), "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let engine = build_engine(&config, &manager, true)?;
            server::serve(engine, &config.server).await?;
        }
        Commands::Analyze {
            file,
            language,
            json,
            no_ai,
        } => {
            let engine = build_engine(&config, &manager, !no_ai)?;
            commands::analyze::run(&engine, &file, language, json).await?;
        }
        Commands::Watch { file, language } => {
            // AI round-trips are too slow for edit-time feedback
            let engine = build_engine(&config, &manager, false)?;
            commands::watch::run(engine, file, language).await?;
        }
        Commands::Config { get, save } => {
            commands::config::run(&manager, get.as_deref(), save.as_deref()).await?;
        }
    }

    Ok(())
}

fn build_engine(config: &CodeqConfig, manager: &ConfigManager, ai: bool) -> Result<QualityEngine> {
    if ai {
        return Ok(QualityEngine::from_config(config, manager.api_key())?);
    }
    config.validate()?;
    Ok(QualityEngine::new(CodeAnalyzer::new()))
}

/// Logs go to stderr so that `analyze --json` output stays parseable
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
