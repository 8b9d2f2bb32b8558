//! Heuristic Code Analysis
//!
//! This module provides the per-language analysis pipeline:
//! - Lexical sanitizing (masking comments and string literals)
//! - Bracket balance and unterminated literal detection
//! - Per-line and per-language style checks
//! - Complexity metrics and canned suggestions
//! - Report assembly, with optional precise JS/TS parsing

pub mod balance;
pub mod checkers;
pub mod lines;
pub mod literals;
pub mod metrics;
pub mod parser;
pub mod sanitizer;
pub mod suggestions;

// Re-export main types
pub use balance::check_balance;
pub use checkers::{SourceView, check_style};
pub use lines::scan_lines;
pub use literals::detect_unterminated;
pub use metrics::compute_metrics;
pub use parser::{ParseOutcome, SyntaxParser, TreeSitterParser};
pub use sanitizer::{Sanitizer, sanitize};
pub use suggestions::suggest;

use codeq_shared::{ComplexityMetrics, Issue, Language};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Result of the heuristic pipeline for one piece of code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Issues in detector execution order
    pub issues: Vec<Issue>,
    pub metrics: ComplexityMetrics,
    pub suggestions: Vec<String>,
    pub syntax_valid: bool,
}

/// Assembles the heuristic report for a piece of code
///
/// Stateless apart from the optional precise parser, so one analyzer can be
/// shared across tasks.
#[derive(Clone)]
pub struct CodeAnalyzer {
    parser: Option<Arc<dyn SyntaxParser>>,
}

impl Default for CodeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeAnalyzer {
    /// Analyzer backed by the tree-sitter JS/TS parser
    pub fn new() -> Self {
        Self::with_parser(Arc::new(TreeSitterParser::new()))
    }

    /// Analyzer using a custom precise parser
    pub fn with_parser(parser: Arc<dyn SyntaxParser>) -> Self {
        Self {
            parser: Some(parser),
        }
    }

    /// Analyzer relying on heuristics alone for every language
    pub fn heuristic_only() -> Self {
        Self { parser: None }
    }

    /// Run the full pipeline over `code`
    #[instrument(skip_all, fields(language = %language, chars = code.len()))]
    pub fn analyze(&self, code: &str, language: Language) -> AnalysisReport {
        let masked = sanitize(code, language);

        let mut issues = check_balance(&masked);
        issues.extend(detect_unterminated(code, language));
        issues.extend(scan_lines(code));
        issues.extend(check_style(
            language,
            &SourceView {
                raw: code,
                masked: &masked,
            },
        ));

        let parsed = match &self.parser {
            Some(parser) if language.is_script() => parser.parse(code, language),
            _ => None,
        };
        if let Some(outcome) = &parsed {
            issues.extend(outcome.issues());
        }

        let metrics = compute_metrics(&masked);
        let suggestions = suggest(&metrics, language);

        let syntax_valid = match &parsed {
            Some(outcome) => outcome.success,
            None => !issues.iter().any(Issue::is_error),
        };

        debug!(
            issues = issues.len(),
            cyclomatic = metrics.cyclomatic,
            score = metrics.score,
            syntax_valid,
            "Heuristic analysis complete"
        );

        AnalysisReport {
            issues,
            metrics,
            suggestions,
            syntax_valid,
        }
    }
}

/// Split on `\r?\n`, keeping a trailing empty segment
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeq_shared::Severity;

    #[test]
    fn test_split_lines_matches_segments() {
        assert_eq!(split_lines("a\r\nb\n").collect::<Vec<_>>(), vec!["a", "b", ""]);
        assert_eq!(split_lines("").count(), 1);
    }

    #[test]
    fn test_issue_order_follows_detectors() {
        let analyzer = CodeAnalyzer::heuristic_only();
        let report = analyzer.analyze("x = (1 \n\tprint 'open", Language::Python);

        let messages: Vec<&str> = report.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages[0], "Unbalanced parentheses: 1 '(' and 0 ')'");
        assert_eq!(messages[1], "Unterminated string literal detected");
        assert_eq!(messages[2], "Trailing whitespace on line 1");
        assert!(messages[3].starts_with("Tab character found on line 2"));
        assert!(!report.syntax_valid);
    }

    #[test]
    fn test_syntax_valid_without_errors() {
        let analyzer = CodeAnalyzer::heuristic_only();
        let report = analyzer.analyze("def f():\n    return 1\n", Language::Python);

        assert!(report.issues.iter().all(|i| i.severity != Severity::Error));
        assert!(report.syntax_valid);
    }

    #[test]
    fn test_script_validity_follows_parser() {
        let analyzer = CodeAnalyzer::new();

        // heuristics see no error here, the parser does
        let report = analyzer.analyze("let x = ;\n", Language::JavaScript);
        assert!(!report.syntax_valid);
        assert!(report.issues.iter().any(|i| i.is_error() && i.line == Some(1)));

        let report = analyzer.analyze("const x = 1;\n", Language::TypeScript);
        assert!(report.syntax_valid);
    }

    #[test]
    fn test_parser_not_used_for_other_languages() {
        let analyzer = CodeAnalyzer::new();
        let report = analyzer.analyze("let x = 1\n", Language::Rust);

        assert!(!report.syntax_valid);
        assert_eq!(report.issues[0].message, "Possible missing ';' in statement");
    }
}
