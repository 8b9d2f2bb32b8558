//! Core engine that orchestrates analysis and the optional AI review

use crate::ai::{AiError, AiReviewer, ExplainRequest, OpenAiReviewer, ReviewRequest};
use crate::analysis::CodeAnalyzer;
use codeq_shared::{AiAnalysis, AnalyzeResponse, CodeqConfig, CodeqError, Language, Result, Timings};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Explanation returned when no reviewer is configured
pub const EXPLANATION_UNAVAILABLE: &str = "AI explanation unavailable (API key not configured)";

/// Explanation returned when the reviewer fails
pub const EXPLANATION_FAILED: &str = "Unable to generate explanation";

/// Main engine that produces quality reports
///
/// Cheap to clone; the analyzer and reviewer are shared.
#[derive(Clone)]
pub struct QualityEngine {
    /// Heuristic pipeline
    analyzer: CodeAnalyzer,

    /// Optional AI collaborator
    reviewer: Option<Arc<dyn AiReviewer>>,

    /// Upper bound on a single AI call
    ai_timeout: Duration,
}

impl QualityEngine {
    /// Engine without AI review
    pub fn new(analyzer: CodeAnalyzer) -> Self {
        Self {
            analyzer,
            reviewer: None,
            ai_timeout: Duration::from_secs(30),
        }
    }

    /// Attach an AI reviewer bounded by `timeout`
    pub fn with_reviewer(mut self, reviewer: Arc<dyn AiReviewer>, timeout: Duration) -> Self {
        self.reviewer = Some(reviewer);
        self.ai_timeout = timeout;
        self
    }

    /// Build the engine described by a configuration
    ///
    /// The AI reviewer is only attached when it is enabled and an API key is
    /// available.
    #[instrument(skip_all)]
    pub fn from_config(config: &CodeqConfig, api_key: Option<&SecretString>) -> Result<Self> {
        config.validate()?;

        let engine = Self::new(CodeAnalyzer::new());
        let timeout = Duration::from_secs(config.ai.timeout_seconds);

        match (config.ai.enabled, api_key) {
            (true, Some(key)) => {
                let key = SecretString::from(key.expose_secret().to_owned());
                let reviewer = OpenAiReviewer::new(&config.ai, key)?;
                info!(model = %config.ai.model, "AI review enabled");
                Ok(engine.with_reviewer(Arc::new(reviewer), timeout))
            }
            (true, None) => {
                info!("AI review disabled: no API key configured");
                Ok(engine)
            }
            (false, _) => {
                debug!("AI review disabled by configuration");
                Ok(engine)
            }
        }
    }

    /// Whether reports may carry AI commentary
    pub fn ai_enabled(&self) -> bool {
        self.reviewer.is_some()
    }

    /// Produce the full report for `code`
    ///
    /// Blank code is rejected. AI failures never fail the report; they only
    /// leave `ai.enabled` false.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4(), language = %language))]
    pub async fn analyze(&self, code: &str, language: Language) -> Result<AnalyzeResponse> {
        if code.trim().is_empty() {
            return Err(CodeqError::InvalidInput {
                message: "Code is required".to_string(),
            });
        }

        let start = Instant::now();
        let report = self.analyzer.analyze(code, language);
        let analysis_ms = elapsed_ms(start);

        let (ai, ai_ms) = match &self.reviewer {
            Some(reviewer) => {
                let request = ReviewRequest {
                    code: code.to_string(),
                    language,
                    issues: report.issues.clone(),
                    metrics: report.metrics,
                };
                let start = Instant::now();
                let ai = self.review(reviewer.as_ref(), &request).await;
                (ai, Some(elapsed_ms(start)))
            }
            None => (AiAnalysis::disabled(), None),
        };

        info!(
            issues = report.issues.len(),
            score = report.metrics.score,
            ai = ai.enabled,
            analysis_ms,
            "Analysis complete"
        );

        Ok(AnalyzeResponse {
            issues: report.issues,
            metrics: report.metrics,
            suggestions: report.suggestions,
            ai: Some(ai),
            syntax_valid: report.syntax_valid,
            timings: Timings { analysis_ms, ai_ms },
        })
    }

    /// Explain one issue; always yields displayable text
    #[instrument(skip_all, fields(language = %request.language))]
    pub async fn explain(&self, request: &ExplainRequest) -> Result<String> {
        if request.issue.trim().is_empty() {
            return Err(CodeqError::InvalidInput {
                message: "Issue is required".to_string(),
            });
        }

        let Some(reviewer) = &self.reviewer else {
            return Ok(EXPLANATION_UNAVAILABLE.to_string());
        };

        match self.bounded(reviewer.explain(request)).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(error = %e, "Issue explanation failed");
                Ok(EXPLANATION_FAILED.to_string())
            }
        }
    }

    async fn review(&self, reviewer: &dyn AiReviewer, request: &ReviewRequest) -> AiAnalysis {
        match self.bounded(reviewer.review(request)).await {
            Ok(review) => review.into_analysis(reviewer.model()),
            Err(e) => {
                warn!(error = %e, "AI review failed, continuing without it");
                AiAnalysis::disabled()
            }
        }
    }

    /// Run one AI call; an elapsed deadline becomes `AiError::Timeout`
    async fn bounded<T>(
        &self,
        call: impl Future<Output = std::result::Result<T, AiError>>,
    ) -> std::result::Result<T, AiError> {
        tokio::time::timeout(self.ai_timeout, call)
            .await
            .unwrap_or_else(|_| Err(AiError::Timeout(self.ai_timeout)))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
