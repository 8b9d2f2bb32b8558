//! Bracket balance checks over masked code

use codeq_shared::Issue;

/// Checked pairs, in report order
const PAIRS: [(char, char, &str); 3] = [
    ('(', ')', "parentheses"),
    ('[', ']', "brackets"),
    ('{', '}', "braces"),
];

/// One whole-file `error` per pair whose open and close counts differ
pub fn check_balance(masked: &str) -> Vec<Issue> {
    PAIRS
        .iter()
        .filter_map(|&(open, close, name)| {
            let opens = masked.chars().filter(|&c| c == open).count();
            let closes = masked.chars().filter(|&c| c == close).count();

            (opens != closes).then(|| {
                Issue::error(format!(
                    "Unbalanced {}: {} '{}' and {} '{}'",
                    name, opens, open, closes, close
                ))
            })
        })
        .collect()
}
