//! Per-language style checkers
//!
//! Each checker receives the raw and masked views of the same source and
//! returns its findings in line order. Checkers never fail.

mod c_family;
mod go;
mod python;
mod ruby;
mod rust_lang;
mod script;

use super::split_lines;
use codeq_shared::{Issue, Language};
use regex::Regex;
use std::sync::LazyLock;

/// The two views of one piece of source code
#[derive(Debug, Clone, Copy)]
pub struct SourceView<'a> {
    /// Code as submitted
    pub raw: &'a str,
    /// Code with comments and literals blanked out
    pub masked: &'a str,
}

/// Run the style checker matching `language`
pub fn check_style(language: Language, view: &SourceView<'_>) -> Vec<Issue> {
    match language {
        Language::JavaScript | Language::TypeScript => script::check(view.masked),
        Language::Python => python::check(view.raw),
        Language::Cpp => c_family::check_cpp(view.masked),
        Language::Java => c_family::check_java(view.masked),
        Language::CSharp => c_family::check_csharp(view.masked),
        Language::Php => c_family::check_php(view.raw),
        Language::Go => go::check(view),
        Language::Rust => rust_lang::check(view.masked),
        Language::Ruby => ruby::check(view.masked),
    }
}

/// A statement terminator, or a trailing line comment after one
static ENDS_OK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;{}:]\s*(//.*)?$").expect("valid regex literal"));

/// Line ends with a closing parenthesis (call or declaration header)
static ENDS_WITH_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\s*$").expect("valid regex literal"));

/// Whether a trimmed line already ends like a complete statement
fn ends_ok(trimmed: &str) -> bool {
    ENDS_OK.is_match(trimmed)
}

fn ends_with_paren(trimmed: &str) -> bool {
    ENDS_WITH_PAREN.is_match(trimmed)
}

/// Flag non-blank lines that do not end like a statement
///
/// `exempt` sees the trimmed line and returns true for lines that are not
/// statements in the checked language.
fn missing_terminators<F>(text: &str, message: &str, exempt: F) -> Vec<Issue>
where
    F: Fn(&str) -> bool,
{
    split_lines(text)
        .enumerate()
        .filter_map(|(idx, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || ends_ok(trimmed) || exempt(trimmed) {
                return None;
            }
            Some(Issue::error(message).at_line(idx + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(code: &str) -> (String, String) {
        (code.to_string(), code.to_string())
    }

    #[test]
    fn test_ends_ok() {
        assert!(ends_ok("x = 1;"));
        assert!(ends_ok("if (x) {"));
        assert!(ends_ok("case 1:"));
        assert!(ends_ok("foo(); // done"));
        assert!(!ends_ok("x = 1"));
    }

    #[test]
    fn test_missing_terminators_reports_lines() {
        let issues = missing_terminators("a;\n\nb\nskip me", "missing", |t| t.starts_with("skip"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(3));
        assert_eq!(issues[0].message, "missing");
    }

    #[test]
    fn test_dispatch_covers_every_language() {
        let (raw, masked) = view("");
        let source = SourceView {
            raw: &raw,
            masked: &masked,
        };
        for language in Language::ALL {
            // empty input: only Go complains (no package clause)
            let issues = check_style(language, &source);
            if language == Language::Go {
                assert_eq!(issues.len(), 1);
            } else {
                assert!(issues.is_empty(), "{language} produced {issues:?}");
            }
        }
    }
}
