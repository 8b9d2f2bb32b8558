//! Ruby block balance

use codeq_shared::Issue;
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(def|class|module|if|unless|while|until|case|begin|do)\b")
        .expect("valid regex literal")
});

static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bend\b").expect("valid regex literal"));

/// Compare block openers with `end` keywords over masked code
///
/// Modifier forms (`x if y`) count as openers, so they read as a missing `end`.
pub(super) fn check(masked: &str) -> Vec<Issue> {
    let opens = BLOCK_OPENER.find_iter(masked).count();
    let ends = BLOCK_END.find_iter(masked).count();

    match opens.cmp(&ends) {
        std::cmp::Ordering::Greater => vec![Issue::error("Missing 'end' for one or more blocks")],
        std::cmp::Ordering::Less => vec![Issue::error("Too many 'end' statements")],
        std::cmp::Ordering::Equal => Vec::new(),
    }
}
