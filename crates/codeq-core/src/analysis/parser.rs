//! Precise JavaScript/TypeScript parsing
//!
//! This module backs the heuristics with a real grammar for script languages:
//! - Syntax errors with line and column, from tree-sitter error recovery
//! - Structural warnings (over-long parameter lists)

use codeq_shared::{Issue, Language, Severity};
use serde::{Deserialize, Serialize};
use tracing::warn;
use tree_sitter::{Node, Parser};

/// Parameter count above which a function declaration is reported
pub const MAX_RECOMMENDED_PARAMS: usize = 5;

/// Stop collecting syntax errors after this many
const MAX_REPORTED_ERRORS: usize = 20;

/// Longest source excerpt quoted in an error message
const SNIPPET_CHARS: usize = 24;

/// Result of parsing a piece of code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Parse success status
    pub success: bool,

    /// Syntax errors, in source order
    pub errors: Vec<ParseError>,

    /// Structural warnings
    pub warnings: Vec<ParseWarning>,
}

/// Syntax error reported by the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (0-based)
    pub column: usize,
}

/// Non-fatal finding reported by the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub message: String,
    pub line: Option<usize>,
    pub severity: Severity,
}

impl ParseOutcome {
    /// Errors then warnings, as report issues
    pub fn issues(&self) -> Vec<Issue> {
        let errors = self
            .errors
            .iter()
            .map(|e| Issue::error(&e.message).at_line(e.line).at_column(e.column));

        let warnings = self.warnings.iter().map(|w| {
            let issue = Issue::new(w.severity, &w.message);
            match w.line {
                Some(line) => issue.at_line(line),
                None => issue,
            }
        });

        errors.chain(warnings).collect()
    }
}

/// Parser collaborator for languages with a precise grammar
pub trait SyntaxParser: Send + Sync {
    /// Parse `code`; `None` when the language is not handled
    fn parse(&self, code: &str, language: Language) -> Option<ParseOutcome>;
}

/// tree-sitter backed parser for JavaScript and TypeScript
#[derive(Debug, Clone)]
pub struct TreeSitterParser {
    javascript: tree_sitter::Language,
    typescript: tree_sitter::Language,
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            javascript: tree_sitter_javascript::LANGUAGE.into(),
            // TSX so that JSX in .ts sources still parses
            typescript: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn grammar(&self, language: Language) -> Option<&tree_sitter::Language> {
        match language {
            Language::JavaScript => Some(&self.javascript),
            Language::TypeScript => Some(&self.typescript),
            _ => None,
        }
    }
}

impl SyntaxParser for TreeSitterParser {
    fn parse(&self, code: &str, language: Language) -> Option<ParseOutcome> {
        let grammar = self.grammar(language)?;

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(grammar) {
            warn!(%language, error = %e, "Failed to load grammar");
            return None;
        }
        let tree = parser.parse(code, None)?;
        let root = tree.root_node();

        let mut errors = collect_errors(root, code);
        if root.has_error() && errors.is_empty() {
            errors.push(ParseError {
                message: "Syntax error".to_string(),
                line: 1,
                column: 0,
            });
        }

        Some(ParseOutcome {
            success: !root.has_error(),
            errors,
            warnings: long_parameter_lists(root),
        })
    }
}

/// ERROR and MISSING nodes, in source order
fn collect_errors(root: Node<'_>, code: &str) -> Vec<ParseError> {
    let mut errors = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if errors.len() >= MAX_REPORTED_ERRORS {
            break;
        }

        let position = node.start_position();
        if node.is_missing() {
            errors.push(ParseError {
                message: format!("Missing '{}'", node.kind()),
                line: position.row + 1,
                column: position.column,
            });
            continue;
        }
        if node.is_error() {
            errors.push(ParseError {
                message: format!("Unexpected '{}'", snippet(node, code)),
                line: position.row + 1,
                column: position.column,
            });
            continue;
        }

        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            // reversed so the stack pops them in source order
            stack.extend(children.into_iter().rev());
        }
    }

    errors
}

/// First line of the node text, shortened
fn snippet(node: Node<'_>, code: &str) -> String {
    let text = node.utf8_text(code.as_bytes()).unwrap_or_default();
    let first_line = text.lines().next().unwrap_or_default().trim();

    if first_line.chars().count() > SNIPPET_CHARS {
        let cut: String = first_line.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}

/// Function declarations taking more than the recommended parameter count
fn long_parameter_lists(root: Node<'_>) -> Vec<ParseWarning> {
    let mut warnings = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if matches!(
            node.kind(),
            "function_declaration" | "generator_function_declaration"
        ) {
            if let Some(params) = node.child_by_field_name("parameters") {
                let mut cursor = params.walk();
                let count = params
                    .named_children(&mut cursor)
                    .filter(|p| p.kind() != "comment")
                    .count();

                if count > MAX_RECOMMENDED_PARAMS {
                    warnings.push(ParseWarning {
                        message: format!(
                            "Function has {} parameters; consider refactoring (max recommended: {})",
                            count, MAX_RECOMMENDED_PARAMS
                        ),
                        line: Some(node.start_position().row + 1),
                        severity: Severity::Warn,
                    });
                }
            }
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    warnings
}
