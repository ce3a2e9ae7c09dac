//! Claude (Anthropic) adapter implementation
//!
//! The Messages API carries system instructions out-of-band and has no native
//! JSON mode. JSON output is emulated by appending instructions during request
//! conversion and running the reply through the fenced-JSON extractor.

use crate::conversion::anthropic::{apply_json_instructions, split_for_anthropic};
use crate::conversion::json_extract::extract_json_payload;
use crate::core::constants::{ANTHROPIC_VERSION, CLAUDE_DEFAULT_MAX_TOKENS, base_url, model};
use crate::core::provider::{AiProvider, ChatBackend, ProviderError};
use crate::models::anthropic::{AnthropicMessagesRequest, AnthropicMessagesResponse};
use crate::models::unified::{GenerationOptions, UnifiedMessage, UnifiedResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Claude adapter for the Anthropic Messages API
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ClaudeClient {
    /// Create a new Claude adapter
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `base_url` - Optional API base URL override
    /// * `model` - Optional default model override
    /// * `timeout` - Request timeout in seconds
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| base_url::ANTHROPIC.to_string()),
            model: model.unwrap_or_else(|| model::CLAUDE.to_string()),
        }
    }

    /// Classify Anthropic errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("invalid x-api-key") || error_lower.contains("authentication") {
            return "Invalid API key. Please check your ANTHROPIC_API_KEY configuration."
                .to_string();
        }

        if error_lower.contains("rate_limit") {
            return "Rate limit exceeded. Please wait and try again.".to_string();
        }

        if error_lower.contains("overloaded") {
            return "Anthropic API is temporarily overloaded. Please retry shortly.".to_string();
        }

        if error_lower.contains("model")
            && (error_lower.contains("not found") || error_lower.contains("not_found"))
        {
            return "Model not found. Please check your ANTHROPIC_MODEL configuration.".to_string();
        }

        error_detail.to_string()
    }
}

#[async_trait]
impl ChatBackend for ClaudeClient {
    async fn complete(
        &self,
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Result<UnifiedResponse, ProviderError> {
        let request_model = options.model.clone().unwrap_or_else(|| self.model.clone());

        let (system, turns) = split_for_anthropic(messages);
        let (system, turns) = if options.json_mode {
            apply_json_instructions(system, turns)
        } else {
            (system, turns)
        };

        let request = AnthropicMessagesRequest {
            model: request_model.clone(),
            max_tokens: options.max_tokens.unwrap_or(CLAUDE_DEFAULT_MAX_TOKENS),
            messages: turns,
            system,
            temperature: options.temperature,
        };

        debug!(
            provider = "claude",
            model = %request_model,
            max_tokens = request.max_tokens,
            message_count = request.messages.len(),
            content_len = request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "dispatching chat completion"
        );

        let url = format!("{}/v1/messages", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Unexpected(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let classified_error = Self::classify_error(&error_text);

            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Authentication(classified_error),
                429 => ProviderError::RateLimit(classified_error),
                400 => ProviderError::BadRequest(classified_error),
                _ => ProviderError::ApiError {
                    status: status.as_u16(),
                    message: classified_error,
                },
            });
        }

        let completion: AnthropicMessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Failed to parse response: {}", e)))?;

        let stop_reason = completion
            .stop_reason
            .unwrap_or_else(|| "unknown".to_string());

        let content = completion
            .content
            .iter()
            .filter(|block| block.content_type == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: AiProvider::Claude,
                finish_reason: stop_reason,
            });
        }

        debug!(
            provider = "claude",
            finish_reason = %stop_reason,
            content_len = content.len(),
            "received chat completion"
        );

        let content = if options.json_mode {
            extract_json_payload(&content)
        } else {
            content
        };

        Ok(UnifiedResponse {
            content,
            provider: AiProvider::Claude,
            model: completion.model,
            fell_back: false,
        })
    }

    fn provider(&self) -> AiProvider {
        AiProvider::Claude
    }
}
