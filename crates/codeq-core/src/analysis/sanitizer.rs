//! Lexical sanitizer
//!
//! Produces a "masked" copy of the source where every character inside a
//! string literal, template literal or comment is replaced by a space. The
//! masked text has the same number of characters as the input and keeps its
//! newlines, so line numbers found on it map back onto the input.
//!
//! One quirk is kept on purpose: a backslash escape inside a string always
//! consumes two characters, even when the second one is a newline. A string
//! continued with `\` at end of line therefore loses that newline in the masked
//! text, and line counts taken from it shift by one.

use codeq_shared::{Language, LanguageFamily};

/// Mask comments and literals of `code` according to `language`
pub fn sanitize(code: &str, language: Language) -> String {
    Sanitizer::for_language(language).sanitize(code)
}

/// Family-specific masking state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    family: LanguageFamily,
    template_literals: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    /// Block comment, closed by the delimiter
    BlockComment(&'static str),
    /// Single-line string opened by the quote
    Str(char),
    /// Triple-quoted string opened by the quote
    TripleStr(char),
    Template,
}

impl Sanitizer {
    pub fn for_language(language: Language) -> Self {
        Self {
            family: language.family(),
            template_literals: language.is_script(),
        }
    }

    /// Mask `code`; never fails, malformed input is masked best-effort
    pub fn sanitize(&self, code: &str) -> String {
        let mut scan = Scan::new(code);
        let mut state = State::Normal;

        while let Some(ch) = scan.peek() {
            state = match state {
                State::Normal => self.normal(&mut scan, ch),
                State::LineComment => {
                    if ch == '\n' {
                        scan.keep();
                        State::Normal
                    } else {
                        scan.mask();
                        State::LineComment
                    }
                }
                State::BlockComment(close) => {
                    if scan.starts_with(close) {
                        scan.blank(close.chars().count());
                        State::Normal
                    } else {
                        scan.mask();
                        state
                    }
                }
                State::Str(quote) => {
                    if ch == '\\' {
                        scan.blank(2);
                        state
                    } else if ch == quote {
                        scan.blank(1);
                        State::Normal
                    } else {
                        scan.mask();
                        state
                    }
                }
                State::TripleStr(quote) => {
                    if scan.triple_at() == Some(quote) {
                        scan.blank(3);
                        State::Normal
                    } else {
                        scan.mask();
                        state
                    }
                }
                State::Template => {
                    if ch == '`' {
                        scan.blank(1);
                        State::Normal
                    } else {
                        scan.mask();
                        State::Template
                    }
                }
            };
        }

        scan.out
    }

    fn normal(&self, scan: &mut Scan, ch: char) -> State {
        match self.family {
            LanguageFamily::Python => {
                if let Some(quote) = scan.triple_at() {
                    scan.blank(3);
                    State::TripleStr(quote)
                } else if ch == '"' || ch == '\'' {
                    scan.blank(1);
                    State::Str(ch)
                } else if ch == '#' {
                    scan.blank(1);
                    State::LineComment
                } else {
                    scan.keep();
                    State::Normal
                }
            }
            LanguageFamily::Ruby => {
                if scan.starts_with("=begin") {
                    scan.blank(6);
                    State::BlockComment("=end")
                } else if ch == '#' {
                    scan.blank(1);
                    State::LineComment
                } else if ch == '"' || ch == '\'' {
                    scan.blank(1);
                    State::Str(ch)
                } else {
                    scan.keep();
                    State::Normal
                }
            }
            LanguageFamily::CLike => {
                if scan.starts_with("//") {
                    scan.blank(2);
                    State::LineComment
                } else if scan.starts_with("/*") {
                    scan.blank(2);
                    State::BlockComment("*/")
                } else if self.template_literals && ch == '`' {
                    scan.blank(1);
                    State::Template
                } else if ch == '"' || ch == '\'' {
                    scan.blank(1);
                    State::Str(ch)
                } else {
                    scan.keep();
                    State::Normal
                }
            }
        }
    }
}

/// Cursor over the input characters and the masked output
struct Scan {
    chars: Vec<char>,
    pos: usize,
    out: String,
}

impl Scan {
    fn new(code: &str) -> Self {
        Self {
            chars: code.chars().collect(),
            pos: 0,
            out: String::with_capacity(code.len()),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let mut rest = self.chars[self.pos..].iter();
        pattern.chars().all(|p| rest.next() == Some(&p))
    }

    /// Quote character if a `"""` or `'''` starts here
    fn triple_at(&self) -> Option<char> {
        match self.chars.get(self.pos..self.pos + 3) {
            Some([a, b, c]) if a == b && b == c && (*a == '"' || *a == '\'') => Some(*a),
            _ => None,
        }
    }

    /// Copy the current character
    fn keep(&mut self) {
        self.out.push(self.chars[self.pos]);
        self.pos += 1;
    }

    /// Mask the current character, preserving a newline
    fn mask(&mut self) {
        let ch = self.chars[self.pos];
        self.out.push(if ch == '\n' { '\n' } else { ' ' });
        self.pos += 1;
    }

    /// Replace up to `n` characters with spaces, newlines included
    fn blank(&mut self, n: usize) {
        let n = n.min(self.chars.len() - self.pos);
        self.out.extend(std::iter::repeat_n(' ', n));
        self.pos += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_c_like_masks_comments_and_strings() {
        let code = "int x = 1; // note (\n/* { */ char *s = \"a(b\";";
        let masked = sanitize(code, Language::Cpp);

        assert_eq!(char_len(&masked), char_len(code));
        assert_eq!(masked, "int x = 1;          \n        char *s =      ;");
    }

    #[test]
    fn test_templates_only_for_scripts() {
        let code = "a = `x(`;";
        assert_eq!(sanitize(code, Language::JavaScript), "a =     ;");
        // not a template outside JS/TS: backtick kept, paren kept
        assert_eq!(sanitize(code, Language::Go), code);
    }

    #[test]
    fn test_template_keeps_newlines() {
        let masked = sanitize("`a\nb`", Language::TypeScript);
        assert_eq!(masked, "  \n  ");
    }

    #[test]
    fn test_python_triple_strings_and_comments() {
        let code = "x = \"\"\"doc\n(\"\"\" # c (\ny = '#'";
        let masked = sanitize(code, Language::Python);

        assert_eq!(masked, "x =       \n          \ny =    ");
        assert_eq!(masked.lines().count(), code.lines().count());
    }

    #[test]
    fn test_ruby_block_comments() {
        let code = "=begin\ndef x\n=end\nputs 'end'";
        let masked = sanitize(code, Language::Ruby);

        assert_eq!(masked, "      \n     \n    \nputs      ");
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let masked = sanitize(r#"s = "a\"(" + x"#, Language::Java);
        assert_eq!(masked, "s =        + x");
    }

    #[test]
    fn test_escape_before_newline_consumes_it() {
        // documented quirk: the escape eats the newline
        let code = "s = \"a\\\nb\";\nnext";
        let masked = sanitize(code, Language::JavaScript);

        assert_eq!(char_len(&masked), char_len(code));
        assert_eq!(masked.split('\n').count(), code.split('\n').count() - 1);
    }

    #[test]
    fn test_trailing_backslash_keeps_length() {
        let code = "x = 'abc\\";
        let masked = sanitize(code, Language::Python);
        assert_eq!(char_len(&masked), char_len(code));
    }

    #[test]
    fn test_unclosed_string_keeps_lines() {
        let code = "x = 'open\ny = 2";
        let masked = sanitize(code, Language::Php);
        assert_eq!(masked, "x =      \n     ");
    }

    #[test]
    fn test_multibyte_characters() {
        let code = "let s = \"héllo\"; // ünïcode";
        let masked = sanitize(code, Language::Rust);
        assert_eq!(char_len(&masked), char_len(code));
        assert!(masked.starts_with("let s ="));
        assert!(masked.trim_end().ends_with(';'));
    }
}
