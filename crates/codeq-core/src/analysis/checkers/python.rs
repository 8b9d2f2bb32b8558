//! Python block header and indentation checks

use codeq_shared::Issue;
use regex::Regex;
use std::sync::LazyLock;

use super::split_lines;

static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(def|class|if|elif|else|for|while|try|except|finally)\b")
        .expect("valid regex literal")
});

/// Line ends with `:`, optionally followed by a comment
static ENDS_WITH_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*(#.*)?$").expect("valid regex literal"));

const TAB_WIDTH: usize = 4;

/// Indentation width with tabs counted as four columns
fn indent_width(leading: &str) -> usize {
    leading
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Python checks over raw code
pub(super) fn check(raw: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut stack: Vec<usize> = vec![0];
    // last line that was neither blank nor a comment
    let mut previous = "";

    for (idx, line) in split_lines(raw).enumerate() {
        let n = idx + 1;
        let content = line.trim_start();
        let leading = &line[..line.len() - content.len()];

        if content.trim().is_empty() || content.starts_with('#') {
            continue;
        }

        if BLOCK_HEADER.is_match(line) && !ENDS_WITH_COLON.is_match(line) {
            issues.push(Issue::error("Missing ':' at end of block header").at_line(n));
        }

        // a header missing its colon still opens a block
        let opens_block = ENDS_WITH_COLON.is_match(previous) || BLOCK_HEADER.is_match(previous);
        previous = line;

        if !leading.contains([' ', '\t']) {
            continue;
        }

        // leading tab, possibly after spaces
        if leading.trim_start_matches(' ').starts_with('\t') {
            issues.push(Issue::warn("Mixed tabs and spaces in indentation").at_line(n));
        }

        let width = indent_width(leading);
        let top = stack.last().copied().unwrap_or(0);

        if width > top {
            if !opens_block {
                issues.push(Issue::error("Unexpected indent").at_line(n));
            }
            stack.push(width);
        } else if width < top {
            while stack.last().is_some_and(|&level| width < level) {
                stack.pop();
            }
            if stack.last() != Some(&width) {
                issues.push(
                    Issue::error(
                        "Inconsistent dedent (indentation level does not match any open block)",
                    )
                    .at_line(n),
                );
            }
        }

        if leading.starts_with(' ') && width % TAB_WIDTH != 0 {
            issues.push(Issue::info("Indentation is not a multiple of 4 spaces").at_line(n));
        }
    }

    issues
}
