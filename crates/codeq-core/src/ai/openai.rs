//! OpenAI Reviewer Implementation
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. A single attempt
//! is made per call; the caller bounds it with its own timeout.

use super::{AiError, AiReview, AiReviewer, ExplainRequest, PromptTemplates, ReviewRequest};
use super::prompts::{EXPLAIN_SYSTEM_PROMPT, REVIEW_SYSTEM_PROMPT};
use async_trait::async_trait;
use codeq_shared::AiConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Token budget of an issue explanation
const EXPLAIN_MAX_TOKENS: u32 = 200;

/// Reviewer backed by the OpenAI chat-completions API
pub struct OpenAiReviewer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: SecretString,
    temperature: f32,
    max_tokens: u32,
    prompts: PromptTemplates,
}

/// Request payload for the chat-completions API
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the chat-completions API
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiReviewer {
    /// Create a reviewer from the AI settings and an API key
    pub fn new(config: &AiConfig, api_key: SecretString) -> Result<Self, AiError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(AiError::ApiKeyMissing);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            prompts: PromptTemplates::new()?,
        })
    }

    /// Send one chat completion and return the message content
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
        json_output: bool,
    ) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens,
            response_format: json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let start = Instant::now();
        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::ResponseParsing(e.to_string()))?;

        debug!(
            model = %self.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chat completion received"
        );

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl AiReviewer for OpenAiReviewer {
    fn model(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip_all, fields(language = %request.language))]
    async fn review(&self, request: &ReviewRequest) -> Result<AiReview, AiError> {
        let prompt = self.prompts.review(request)?;
        let content = self
            .complete(REVIEW_SYSTEM_PROMPT, &prompt, self.max_tokens, true)
            .await?;

        parse_review(&content)
    }

    #[instrument(skip_all, fields(language = %request.language))]
    async fn explain(&self, request: &ExplainRequest) -> Result<String, AiError> {
        let prompt = self.prompts.explain(request)?;
        self.complete(EXPLAIN_SYSTEM_PROMPT, &prompt, EXPLAIN_MAX_TOKENS, false)
            .await
    }
}

/// Decode the JSON object a review answer is expected to contain
fn parse_review(content: &str) -> Result<AiReview, AiError> {
    serde_json::from_str(content.trim()).map_err(|e| AiError::ResponseParsing(e.to_string()))
}
