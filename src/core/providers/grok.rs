//! Grok (xAI) adapter implementation
//!
//! xAI exposes an OpenAI-compatible chat-completions surface at its own base
//! endpoint, so this adapter reuses the OpenAI wire models and role handling.
//! Unlike GPT, Grok honors the caller's sampling temperature and has a native
//! JSON-mode flag.

use crate::conversion::openai::to_openai_messages;
use crate::core::constants::{base_url, model};
use crate::core::provider::{AiProvider, ChatBackend, ProviderError};
use crate::models::openai::{OpenAiChatRequest, OpenAiChatResponse, OpenAiResponseFormat};
use crate::models::unified::{GenerationOptions, UnifiedMessage, UnifiedResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Grok adapter for the xAI chat completions API
pub struct GrokClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GrokClient {
    /// Create a new Grok adapter
    ///
    /// # Arguments
    ///
    /// * `api_key` - xAI API key
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
            base_url: base_url.unwrap_or_else(|| base_url::XAI.to_string()),
            model: model.unwrap_or_else(|| model::GROK.to_string()),
        }
    }

    /// Classify xAI errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("invalid") && error_lower.contains("key") {
            return "Invalid API key. Please check your XAI_API_KEY configuration.".to_string();
        }

        if error_lower.contains("rate_limit") || error_lower.contains("quota") {
            return "Rate limit exceeded. Please wait and try again.".to_string();
        }

        if error_lower.contains("credits") {
            return "Insufficient credits. Please check your xAI account balance.".to_string();
        }

        if error_lower.contains("model")
            && (error_lower.contains("not found") || error_lower.contains("does not exist"))
        {
            return "Model not found. Please check your XAI_MODEL configuration.".to_string();
        }

        error_detail.to_string()
    }
}

#[async_trait]
impl ChatBackend for GrokClient {
    async fn complete(
        &self,
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Result<UnifiedResponse, ProviderError> {
        let request_model = options.model.clone().unwrap_or_else(|| self.model.clone());

        let request = OpenAiChatRequest {
            model: request_model.clone(),
            messages: to_openai_messages(messages),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            response_format: options
                .json_mode
                .then(OpenAiResponseFormat::json_object),
        };

        debug!(
            provider = "grok",
            model = %request_model,
            message_count = request.messages.len(),
            content_len = request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "dispatching chat completion"
        );

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
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
                401 => ProviderError::Authentication(classified_error),
                429 => ProviderError::RateLimit(classified_error),
                400 => ProviderError::BadRequest(classified_error),
                _ => ProviderError::ApiError {
                    status: status.as_u16(),
                    message: classified_error,
                },
            });
        }

        let completion: OpenAiChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Failed to parse response: {}", e)))?;

        let choice =
            completion
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::EmptyResponse {
                    provider: AiProvider::Grok,
                    finish_reason: "no_choices".to_string(),
                })?;

        let finish_reason = choice
            .finish_reason
            .unwrap_or_else(|| "unknown".to_string());
        let content = choice.message.content.unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: AiProvider::Grok,
                finish_reason,
            });
        }

        debug!(
            provider = "grok",
            finish_reason = %finish_reason,
            content_len = content.len(),
            "received chat completion"
        );

        Ok(UnifiedResponse {
            content,
            provider: AiProvider::Grok,
            model: completion.model,
            fell_back: false,
        })
    }

    fn provider(&self) -> AiProvider {
        AiProvider::Grok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_credits_error() {
        let result = GrokClient::classify_error("insufficient credits for request");
        assert!(result.contains("credits"));
    }

    #[test]
    fn test_classify_key_error() {
        let result = GrokClient::classify_error("invalid api key supplied");
        assert!(result.contains("XAI_API_KEY"));
    }
}
