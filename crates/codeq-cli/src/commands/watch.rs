//! Watch a file and re-analyze it after edits settle

use super::analyze::render_report;
use super::{read_source, resolve_language};
use anyhow::Result;
use codeq_core::{Debouncer, Language, QualityEngine};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// How often the file's modification time is checked
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub async fn run(engine: QualityEngine, file: PathBuf, language: Option<Language>) -> Result<()> {
    let language = resolve_language(&file, language)?;
    let debouncer = Debouncer::default();
    let mut last_seen: Option<SystemTime> = None;

    info!(file = %file.display(), %language, "Watching for changes, Ctrl-C to stop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                debouncer.cancel();
                info!("Stopped watching");
                return Ok(());
            }
            _ = ticker.tick() => {}
        }

        let modified = match modified_at(&file).await {
            Ok(modified) => modified,
            Err(e) => {
                debug!(error = %e, "File not readable");
                continue;
            }
        };
        if last_seen == Some(modified) {
            continue;
        }
        last_seen = Some(modified);

        let engine = engine.clone();
        let file = file.clone();
        debouncer.trigger(async move {
            if let Err(e) = report(&engine, &file, language).await {
                warn!(error = %e, "Re-analysis failed");
            }
        });
    }
}

async fn modified_at(path: &Path) -> std::io::Result<SystemTime> {
    tokio::fs::metadata(path).await?.modified()
}

async fn report(engine: &QualityEngine, file: &Path, language: Language) -> Result<()> {
    let code = read_source(file).await?;
    if code.trim().is_empty() {
        debug!("Skipping empty file");
        return Ok(());
    }

    let response = engine.analyze(&code, language).await?;
    println!("\n== {} ({}) ==", file.display(), language);
    print!("{}", render_report(&response));
    Ok(())
}
