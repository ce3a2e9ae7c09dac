//! GPT (OpenAI) adapter implementation

use crate::conversion::openai::to_openai_messages;
use crate::core::constants::{GPT_FIXED_TEMPERATURE, base_url, model};
use crate::core::provider::{AiProvider, ChatBackend, ProviderError};
use crate::models::openai::{OpenAiChatRequest, OpenAiChatResponse, OpenAiResponseFormat};
use crate::models::unified::{GenerationOptions, UnifiedMessage, UnifiedResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// GPT adapter for the OpenAI chat completions API
pub struct GptClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GptClient {
    /// Create a new GPT adapter
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
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
            base_url: base_url.unwrap_or_else(|| base_url::OPENAI.to_string()),
            model: model.unwrap_or_else(|| model::GPT.to_string()),
        }
    }

    /// Classify OpenAI errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("invalid_api_key") || error_lower.contains("unauthorized") {
            return "Invalid API key. Please check your OPENAI_API_KEY configuration.".to_string();
        }

        if error_lower.contains("rate_limit") || error_lower.contains("quota") {
            return "Rate limit exceeded. Please wait and try again, or upgrade your API plan."
                .to_string();
        }

        if error_lower.contains("model")
            && (error_lower.contains("not found") || error_lower.contains("does not exist"))
        {
            return "Model not found. Please check your OPENAI_MODEL configuration.".to_string();
        }

        if error_lower.contains("billing") || error_lower.contains("payment") {
            return "Billing issue. Please check your OpenAI account billing status.".to_string();
        }

        error_detail.to_string()
    }
}

#[async_trait]
impl ChatBackend for GptClient {
    async fn complete(
        &self,
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Result<UnifiedResponse, ProviderError> {
        let request_model = options.model.clone().unwrap_or_else(|| self.model.clone());

        // The vendor rejects non-default sampling temperatures for this
        // model family, so the caller's value is not forwarded.
        let request = OpenAiChatRequest {
            model: request_model.clone(),
            messages: to_openai_messages(messages),
            max_tokens: options.max_tokens,
            temperature: Some(GPT_FIXED_TEMPERATURE),
            response_format: options
                .json_mode
                .then(OpenAiResponseFormat::json_object),
        };

        debug!(
            provider = "gpt",
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
                    provider: AiProvider::Gpt,
                    finish_reason: "no_choices".to_string(),
                })?;

        let finish_reason = choice
            .finish_reason
            .unwrap_or_else(|| "unknown".to_string());
        let content = choice.message.content.unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: AiProvider::Gpt,
                finish_reason,
            });
        }

        debug!(
            provider = "gpt",
            finish_reason = %finish_reason,
            content_len = content.len(),
            "received chat completion"
        );

        Ok(UnifiedResponse {
            content,
            provider: AiProvider::Gpt,
            model: completion.model,
            fell_back: false,
        })
    }

    fn provider(&self) -> AiProvider {
        AiProvider::Gpt
    }
}
