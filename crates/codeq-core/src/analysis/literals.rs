//! Unterminated string literal detection on raw source

use codeq_shared::{Issue, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Quote(char),
    Triple(char),
}

/// Report a string, char or template literal left open at end of input
///
/// Works on the raw text. `"`, `'` and `` ` `` open a literal in every
/// language; triple quotes are only recognised for Python. A backslash skips
/// the next character inside a single-quoted kind of literal.
pub fn detect_unterminated(raw: &str, language: Language) -> Vec<Issue> {
    let chars: Vec<char> = raw.chars().collect();
    let triple_quotes = language == Language::Python;

    let mut current: Option<Open> = None;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match current {
            None => {
                if let Some(quote) = triple_quotes.then(|| triple_at(&chars, i)).flatten() {
                    current = Some(Open::Triple(quote));
                    i += 3;
                    continue;
                }
                if matches!(ch, '"' | '\'' | '`') {
                    current = Some(Open::Quote(ch));
                    escaped = false;
                }
            }
            Some(Open::Triple(quote)) => {
                if triple_at(&chars, i) == Some(quote) {
                    current = None;
                    i += 3;
                    continue;
                }
            }
            Some(Open::Quote(quote)) => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == quote {
                    current = None;
                }
            }
        }
        i += 1;
    }

    match current {
        Some(_) => vec![Issue::error("Unterminated string literal detected")],
        None => Vec::new(),
    }
}

fn triple_at(chars: &[char], i: usize) -> Option<char> {
    match chars.get(i..i + 3) {
        Some([a, b, c]) if a == b && b == c && (*a == '"' || *a == '\'') => Some(*a),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_literals() {
        assert!(detect_unterminated(r#"let s = "a\"b"; let t = 'c';"#, Language::JavaScript).is_empty());
        assert!(detect_unterminated("const t = `x ${y}`;", Language::TypeScript).is_empty());
    }

    #[test]
    fn test_open_string_at_end() {
        let issues = detect_unterminated("print('hello)", Language::Python);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Unterminated string literal detected");
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_escaped_closing_quote_stays_open() {
        assert_eq!(detect_unterminated(r#"s = "abc\""#, Language::Go).len(), 1);
    }

    #[test]
    fn test_python_triple_quotes() {
        assert!(detect_unterminated("x = \"\"\"it's\n\"\"\"", Language::Python).is_empty());
        assert_eq!(detect_unterminated("x = '''never closed", Language::Python).len(), 1);
    }

    #[test]
    fn test_triple_quotes_only_for_python() {
        // outside Python `"""` is an empty string followed by an open one
        assert_eq!(detect_unterminated("x = \"\"\"", Language::Ruby).len(), 1);
        assert!(detect_unterminated("x = \"\"\"\"", Language::Ruby).is_empty());
    }
}
