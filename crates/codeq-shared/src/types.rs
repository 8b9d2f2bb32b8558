//! Core types used throughout codeq

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Programming languages supported by codeq
///
/// Serialized as the lowercase tag; deserialized case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
    Python,
    Java,
    CSharp,
    Cpp,
    Go,
    Rust,
    Php,
    Ruby,
}

/// Grouping of languages by their comment and string lexical conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFamily {
    /// `#` comments, triple-quoted strings
    Python,
    /// `#` comments, `=begin`/`=end` blocks
    Ruby,
    /// `//` and `/* */` comments
    CLike,
}

impl Language {
    /// Every supported language, in wire-tag order
    pub const ALL: [Language; 10] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::CSharp,
        Language::Cpp,
        Language::Go,
        Language::Rust,
        Language::Php,
        Language::Ruby,
    ];

    /// Wire tag of the language
    pub fn tag(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Php => "php",
            Language::Ruby => "ruby",
        }
    }

    /// Lexical family used by the sanitizer
    pub fn family(self) -> LanguageFamily {
        match self {
            Language::Python => LanguageFamily::Python,
            Language::Ruby => LanguageFamily::Ruby,
            _ => LanguageFamily::CLike,
        }
    }

    /// Whether the language is JavaScript or TypeScript
    pub fn is_script(self) -> bool {
        matches!(self, Language::JavaScript | Language::TypeScript)
    }

    /// Get file extensions for this language
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
            Language::Python => &["py", "pyi"],
            Language::Java => &["java"],
            Language::CSharp => &["cs"],
            Language::Cpp => &["cpp", "cxx", "cc", "hpp", "hxx", "h"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::Php => &["php"],
            Language::Ruby => &["rb"],
        }
    }

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.tag() == lowered)
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

/// Severity of a detected issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Code issue detected during analysis
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Issue {
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Issue {
    /// Whole-file issue with no position
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            line: None,
            column: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Attach a 1-based line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a 0-based column
    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Heuristic complexity metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComplexityMetrics {
    /// Overall score (0-100, 100 = simplest)
    pub score: u32,
    pub cyclomatic: usize,
    pub lines: usize,
    pub functions: usize,
    /// Maintainability (0-100, higher is better)
    pub maintainability: u32,
}

/// Incoming analysis request
///
/// Both fields may be omitted on the wire; blank code is rejected by the
/// engine and the language falls back to JavaScript.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub language: Language,
}

/// Optional AI commentary attached to a report
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_issues: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refactoring_suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_practices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl AiAnalysis {
    /// Block reported when no AI commentary was produced
    pub fn disabled() -> Self {
        Self::default()
    }
}

/// Wall-clock timings of one analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
    pub analysis_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_ms: Option<u64>,
}

/// Full analysis response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub issues: Vec<Issue>,
    pub metrics: ComplexityMetrics,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiAnalysis>,
    pub syntax_valid: bool,
    pub timings: Timings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.tag().parse::<Language>().unwrap(), lang);
        }
        assert_eq!("Python".parse::<Language>().unwrap(), Language::Python);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_request_language_tags() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"code": "x", "language": "CSharp"}"#).unwrap();
        assert_eq!(request.language, Language::CSharp);

        let request: AnalyzeRequest = serde_json::from_str(r#"{"code": "x"}"#).unwrap();
        assert_eq!(request.language, Language::JavaScript);

        let err = serde_json::from_str::<AnalyzeRequest>(r#"{"language": "cobol"}"#).unwrap_err();
        assert!(err.to_string().contains("Unsupported language: cobol"));

        assert_eq!(serde_json::to_value(Language::CSharp).unwrap(), "csharp");
    }

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
        assert_eq!(Language::from_extension("TSX"), Some(Language::TypeScript));
        assert_eq!(Language::from_extension("cs"), Some(Language::CSharp));
        assert_eq!(Language::from_extension("txt"), None);
    }

    #[test]
    fn test_language_family() {
        assert_eq!(Language::Python.family(), LanguageFamily::Python);
        assert_eq!(Language::Ruby.family(), LanguageFamily::Ruby);
        assert_eq!(Language::Php.family(), LanguageFamily::CLike);
    }

    #[test]
    fn test_response_wire_format() {
        let response = AnalyzeResponse {
            issues: vec![Issue::warn("Uses fmt without importing it").at_line(3)],
            metrics: ComplexityMetrics {
                score: 95,
                cyclomatic: 1,
                lines: 1,
                functions: 0,
                maintainability: 100,
            },
            suggestions: Vec::new(),
            ai: Some(AiAnalysis::disabled()),
            syntax_valid: true,
            timings: Timings { analysis_ms: 2, ai_ms: None },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["syntaxValid"], true);
        assert_eq!(json["issues"][0]["severity"], "warn");
        assert_eq!(json["issues"][0]["line"], 3);
        assert!(json["issues"][0].get("column").is_none());
        assert_eq!(json["ai"]["enabled"], false);
        assert_eq!(json["timings"]["analysisMs"], 2);
        assert!(json["timings"].get("aiMs").is_none());
    }
}
