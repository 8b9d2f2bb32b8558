//! JavaScript and TypeScript style hints

use codeq_shared::Issue;
use regex::Regex;
use std::sync::LazyLock;

static CONSOLE_LOG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"console\.log\(").expect("valid regex literal"));

static VAR_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvar\b").expect("valid regex literal"));

/// `==` or `!=` that is not part of `===` / `!==`
static LOOSE_EQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^=!<>])(?:==|!=)(?:[^=]|$)").expect("valid regex literal")
});

/// JS/TS hints over masked code
pub(super) fn check(masked: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if CONSOLE_LOG.is_match(masked) {
        issues.push(Issue::info("Avoid leaving console.log in production code."));
    }
    if VAR_DECL.is_match(masked) {
        issues.push(Issue::info("Avoid 'var'; use let/const."));
    }
    if LOOSE_EQUALITY.is_match(masked) {
        issues.push(Issue::info("Use strict equality '===' instead of '=='."));
    }

    issues
}
