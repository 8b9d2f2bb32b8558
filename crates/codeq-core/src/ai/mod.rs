//! AI Reviewer
//!
//! This module provides the optional language-model collaborator:
//! - Abstract reviewer interface, mockable in tests
//! - OpenAI chat-completions implementation
//! - Handlebars prompt templates
//!
//! The heuristic report never depends on it; every failure here is turned
//! into a report without AI commentary by the engine.

pub mod openai;
pub mod prompts;

// Re-export main types
pub use openai::OpenAiReviewer;
pub use prompts::PromptTemplates;

use async_trait::async_trait;
use codeq_shared::{AiAnalysis, CodeqError, ComplexityMetrics, Issue, Language};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Reviewer interface used by the engine
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiReviewer: Send + Sync {
    /// Model name reported alongside reviews
    fn model(&self) -> String;

    /// Review a piece of code given the heuristic findings
    async fn review(&self, request: &ReviewRequest) -> Result<AiReview, AiError>;

    /// Explain a single issue in plain words
    async fn explain(&self, request: &ExplainRequest) -> Result<String, AiError>;
}

/// Input of a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
    pub language: Language,
    pub issues: Vec<Issue>,
    pub metrics: ComplexityMetrics,
}

/// Input of an issue explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainRequest {
    /// Issue message as shown to the user
    pub issue: String,
    pub code: String,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Structured review returned by the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiReview {
    pub summary: String,
    pub security_issues: Vec<String>,
    pub refactoring_suggestions: Vec<String>,
    pub best_practices: Vec<String>,
    pub explanation: String,
}

impl AiReview {
    /// Attach the review to a report
    pub fn into_analysis(self, model: String) -> AiAnalysis {
        AiAnalysis {
            enabled: true,
            model: Some(model),
            summary: Some(self.summary),
            security_issues: Some(self.security_issues),
            refactoring_suggestions: Some(self.refactoring_suggestions),
            best_practices: Some(self.best_practices),
            explanation: Some(self.explanation),
        }
    }
}

/// Error types specific to AI operations
#[derive(Debug, Error)]
pub enum AiError {
    #[error("OpenAI API key is not configured")]
    ApiKeyMissing,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Failed to parse AI response: {0}")]
    ResponseParsing(String),

    #[error("AI response had no content")]
    EmptyResponse,

    #[error("AI request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Prompt template error: {0}")]
    Template(String),
}

impl From<AiError> for CodeqError {
    fn from(error: AiError) -> Self {
        match error {
            AiError::Template(message) => CodeqError::Template { message },
            _ => CodeqError::Ai {
                message: error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_parses_partial_json() {
        let review: AiReview =
            serde_json::from_str(r#"{"summary":"Fine","securityIssues":["eval"]}"#).unwrap();

        assert_eq!(review.summary, "Fine");
        assert_eq!(review.security_issues, vec!["eval"]);
        assert!(review.best_practices.is_empty());
    }

    #[test]
    fn test_into_analysis() {
        let review = AiReview {
            summary: "Short".to_string(),
            ..Default::default()
        };
        let analysis = review.into_analysis("gpt-4o-mini".to_string());

        assert!(analysis.enabled);
        assert_eq!(analysis.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(analysis.summary.as_deref(), Some("Short"));
        assert_eq!(analysis.security_issues, Some(vec![]));
    }

    #[test]
    fn test_error_conversion() {
        let error: CodeqError = AiError::Template("bad".to_string()).into();
        assert!(matches!(error, CodeqError::Template { .. }));

        let error: CodeqError = AiError::EmptyResponse.into();
        assert_eq!(error.to_string(), "AI service error: AI response had no content");
    }

    #[test]
    fn test_explain_request_line_is_optional() {
        let request: ExplainRequest = serde_json::from_str(
            r#"{"issue":"Unexpected indent","code":"x","language":"python"}"#,
        )
        .unwrap();
        assert_eq!(request.line, None);
        assert_eq!(request.language, Language::Python);
    }
}
