//! Rust statement checks

use super::missing_terminators;
use codeq_shared::Issue;
use regex::Regex;
use std::sync::LazyLock;

static STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(let\b|return\b|break\b|continue\b)").expect("valid regex literal")
});

static MACRO_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\s*\(").expect("valid regex literal"));

/// `let`/`return`/`break`/`continue` lines must end like a statement
pub(super) fn check(masked: &str) -> Vec<Issue> {
    missing_terminators(masked, "Possible missing ';' in statement", |t| {
        !STATEMENT.is_match(t) || MACRO_CALL.is_match(t)
    })
}
