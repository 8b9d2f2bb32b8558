//! Prompt templates for the AI reviewer

use super::{AiError, ExplainRequest, ReviewRequest};
use handlebars::Handlebars;
use serde_json::json;

/// System message sent with every review
pub const REVIEW_SYSTEM_PROMPT: &str = "You are an expert code reviewer who provides constructive, actionable feedback. Always respond with valid JSON.";

/// System message sent with every issue explanation
pub const EXPLAIN_SYSTEM_PROMPT: &str =
    "You are a helpful coding tutor who explains issues clearly and concisely.";

const REVIEW_TEMPLATE: &str = r#"You are an expert code reviewer. Analyze this {{language}} code and provide detailed insights.

Code:
```{{language}}
{{code}}
```

Current Analysis:
- Issues detected: {{issue_count}}
- Cyclomatic complexity: {{metrics.cyclomatic}}
- Lines of code: {{metrics.lines}}
- Maintainability score: {{metrics.maintainability}}/100

Please provide:
1. A brief summary (2-3 sentences) of the code quality
2. Any security vulnerabilities or concerns
3. Specific refactoring suggestions with code examples
4. Best practices that should be followed
5. An explanation of the main complexity issues

Format your response as JSON with these keys:
{
  "summary": "...",
  "securityIssues": ["...", "..."],
  "refactoringSuggestions": ["...", "..."],
  "bestPractices": ["...", "..."],
  "explanation": "..."
}"#;

const EXPLAIN_TEMPLATE: &str = r#"Explain this code issue in simple terms and provide a fix:

Language: {{language}}
Issue: {{issue}}{{#if line}} on line {{line}}{{/if}}

Code snippet:
```{{language}}
{{code}}
```

Provide a clear explanation and suggested fix in 2-3 sentences."#;

/// Registered prompt templates
pub struct PromptTemplates {
    handlebars: Handlebars<'static>,
}

impl PromptTemplates {
    pub fn new() -> Result<Self, AiError> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape); // code is sent verbatim

        for (name, template) in [("review", REVIEW_TEMPLATE), ("explain", EXPLAIN_TEMPLATE)] {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| AiError::Template(format!("Failed to register '{}': {}", name, e)))?;
        }

        Ok(Self { handlebars })
    }

    /// User prompt of a review
    pub fn review(&self, request: &ReviewRequest) -> Result<String, AiError> {
        let data = json!({
            "language": request.language.tag(),
            "code": request.code,
            "issue_count": request.issues.len(),
            "metrics": request.metrics,
        });
        self.render("review", &data)
    }

    /// User prompt of an issue explanation
    pub fn explain(&self, request: &ExplainRequest) -> Result<String, AiError> {
        let data = json!({
            "language": request.language.tag(),
            "issue": request.issue,
            "line": request.line,
            "code": request.code,
        });
        self.render("explain", &data)
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, AiError> {
        self.handlebars
            .render(name, data)
            .map_err(|e| AiError::Template(format!("Failed to render '{}': {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeq_shared::{ComplexityMetrics, Issue, Language};

    fn metrics() -> ComplexityMetrics {
        ComplexityMetrics {
            score: 90,
            cyclomatic: 3,
            lines: 12,
            functions: 1,
            maintainability: 81,
        }
    }

    #[test]
    fn test_review_prompt() {
        let prompts = PromptTemplates::new().unwrap();
        let prompt = prompts
            .review(&ReviewRequest {
                code: "if (a < b && c) { run(\"x\"); }".to_string(),
                language: Language::JavaScript,
                issues: vec![Issue::info("one"), Issue::warn("two")],
                metrics: metrics(),
            })
            .unwrap();

        assert!(prompt.starts_with("You are an expert code reviewer. Analyze this javascript code"));
        // no HTML escaping of code
        assert!(prompt.contains("```javascript\nif (a < b && c) { run(\"x\"); }\n```"));
        assert!(prompt.contains("- Issues detected: 2\n"));
        assert!(prompt.contains("- Cyclomatic complexity: 3\n"));
        assert!(prompt.contains("- Lines of code: 12\n"));
        assert!(prompt.contains("- Maintainability score: 81/100"));
        assert!(prompt.contains("\"securityIssues\": [\"...\", \"...\"]"));
    }

    #[test]
    fn test_explain_prompt_with_and_without_line() {
        let prompts = PromptTemplates::new().unwrap();
        let mut request = ExplainRequest {
            issue: "Unexpected indent".to_string(),
            code: "x = 1\n    y = 2".to_string(),
            language: Language::Python,
            line: Some(2),
        };

        let prompt = prompts.explain(&request).unwrap();
        assert!(prompt.contains("Language: python\nIssue: Unexpected indent on line 2\n"));
        assert!(prompt.ends_with("Provide a clear explanation and suggested fix in 2-3 sentences."));

        request.line = None;
        let prompt = prompts.explain(&request).unwrap();
        assert!(prompt.contains("Issue: Unexpected indent\n"));
    }
}
