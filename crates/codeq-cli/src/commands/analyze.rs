//! One-shot analysis

use super::{read_source, resolve_language};
use anyhow::Result;
use codeq_core::{AnalyzeResponse, Issue, Language, QualityEngine, Severity};
use std::fmt;
use std::path::Path;

pub async fn run(
    engine: &QualityEngine,
    file: &Path,
    language: Option<Language>,
    json: bool,
) -> Result<()> {
    let language = resolve_language(file, language)?;
    let code = read_source(file).await?;

    let response = engine.analyze(&code, language).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_report(&response));
    }

    Ok(())
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warn => "warn",
        Severity::Error => "error",
    }
}

fn render_issue(issue: &Issue) -> String {
    let position = match (issue.line, issue.column) {
        (Some(line), Some(column)) => format!(" {}:{}", line, column),
        (Some(line), None) => format!(" {}", line),
        _ => String::new(),
    };
    format!("[{}]{} {}", severity_label(issue.severity), position, issue.message)
}

/// Human-readable report
pub fn render_report(response: &AnalyzeResponse) -> String {
    Report(response).to_string()
}

struct Report<'a>(&'a AnalyzeResponse);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.0;
        let m = &response.metrics;

        writeln!(
            f,
            "Syntax: {}",
            if response.syntax_valid { "valid" } else { "invalid" }
        )?;
        writeln!(
            f,
            "Score: {}/100  Maintainability: {}/100  Cyclomatic: {}  Lines: {}  Functions: {}",
            m.score, m.maintainability, m.cyclomatic, m.lines, m.functions
        )?;

        if !response.issues.is_empty() {
            writeln!(f, "\nIssues ({}):", response.issues.len())?;
            for issue in &response.issues {
                writeln!(f, "  {}", render_issue(issue))?;
            }
        }

        if !response.suggestions.is_empty() {
            writeln!(f, "\nSuggestions:")?;
            for suggestion in &response.suggestions {
                writeln!(f, "  - {}", suggestion)?;
            }
        }

        if let Some(ai) = response.ai.as_ref().filter(|ai| ai.enabled) {
            writeln!(f, "\nAI review ({}):", ai.model.as_deref().unwrap_or("unknown"))?;
            if let Some(summary) = &ai.summary {
                writeln!(f, "  {}", summary)?;
            }
            let sections = [
                ("Security", &ai.security_issues),
                ("Refactoring", &ai.refactoring_suggestions),
                ("Best practices", &ai.best_practices),
            ];
            for (title, items) in sections {
                let Some(items) = items.as_ref().filter(|items| !items.is_empty()) else {
                    continue;
                };
                writeln!(f, "  {}:", title)?;
                for item in items {
                    writeln!(f, "    - {}", item)?;
                }
            }
        }

        writeln!(f, "\nAnalyzed in {} ms", response.timings.analysis_ms)
    }
}
