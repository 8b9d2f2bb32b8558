//! Per-line formatting checks

use super::split_lines;
use codeq_shared::Issue;

/// Longest line, in characters, before a warning is raised
pub const MAX_LINE_LENGTH: usize = 120;

/// Length, trailing whitespace and tab checks on every raw line
pub fn scan_lines(raw: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (idx, line) in split_lines(raw).enumerate() {
        let n = idx + 1;

        let len = line.chars().count();
        if len > MAX_LINE_LENGTH {
            issues.push(
                Issue::warn(format!(
                    "Line {} exceeds {} characters ({})",
                    n, MAX_LINE_LENGTH, len
                ))
                .at_line(n),
            );
        }

        if line.ends_with(char::is_whitespace) {
            issues.push(Issue::info(format!("Trailing whitespace on line {}", n)).at_line(n));
        }

        if line.contains('\t') {
            issues.push(
                Issue::info(format!(
                    "Tab character found on line {}; prefer spaces for consistency",
                    n
                ))
                .at_line(n),
            );
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeq_shared::Severity;

    #[test]
    fn test_clean_lines() {
        assert!(scan_lines("fn main() {\n    run();\n}\n").is_empty());
    }

    #[test]
    fn test_long_line() {
        let code = format!("ok\n{}", "x".repeat(121));
        let issues = scan_lines(&code);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Line 2 exceeds 120 characters (121)");
        assert_eq!(issues[0].severity, Severity::Warn);
        assert_eq!(issues[0].line, Some(2));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(scan_lines(&"é".repeat(120)).is_empty());
    }

    #[test]
    fn test_crlf_is_not_trailing_whitespace() {
        assert!(scan_lines("a = 1\r\nb = 2\r\n").is_empty());
    }

    #[test]
    fn test_tab_line_reports_both() {
        let issues = scan_lines("x\n\ty = 1\t");
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();

        assert_eq!(
            messages,
            vec![
                "Trailing whitespace on line 2",
                "Tab character found on line 2; prefer spaces for consistency",
            ]
        );
        assert!(issues.iter().all(|i| i.severity == Severity::Info));
    }
}
