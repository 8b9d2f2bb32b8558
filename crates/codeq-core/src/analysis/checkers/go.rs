//! Go package and import checks

use super::SourceView;
use codeq_shared::Issue;
use regex::Regex;
use std::sync::LazyLock;

static FMT_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfmt\.").expect("valid regex literal"));

/// `import "fmt"`, or `import ("fmt"` with the path right after the paren
///
/// A multi-line import group listing `"fmt"` on its own line does not match.
static FMT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s*(\(|\s*)["']fmt["']"#).expect("valid regex literal")
});

static PACKAGE_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*package\s+\w+").expect("valid regex literal"));

/// Usage is read from the masked view, the import path from the raw one
pub(super) fn check(view: &SourceView<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    if FMT_USE.is_match(view.masked) && !FMT_IMPORT.is_match(view.raw) {
        issues.push(Issue::warn("Uses fmt without importing it"));
    }
    if !PACKAGE_CLAUSE.is_match(view.masked) {
        issues.push(Issue::info("Missing package declaration"));
    }

    issues
}
