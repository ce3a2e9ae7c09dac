//! Gemini (Google) adapter implementation

use crate::conversion::gemini::split_for_gemini;
use crate::core::constants::{base_url, model};
use crate::core::provider::{AiProvider, ChatBackend, ProviderError};
use crate::models::gemini::{GeminiGenerateRequest, GeminiGenerateResponse, GeminiGenerationConfig};
use crate::models::unified::{GenerationOptions, UnifiedMessage, UnifiedResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Gemini adapter for the Google Generative Language API
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini adapter
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google AI API key
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
            base_url: base_url.unwrap_or_else(|| base_url::GEMINI.to_string()),
            model: model.unwrap_or_else(|| model::GEMINI.to_string()),
        }
    }

    /// Classify Gemini errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("api key not valid") || error_lower.contains("api_key_invalid") {
            return "Invalid API key. Please check your GEMINI_API_KEY configuration.".to_string();
        }

        if error_lower.contains("quota") || error_lower.contains("resource_exhausted") {
            return "Rate limit or quota exceeded. Please check your Google AI quota.".to_string();
        }

        if error_lower.contains("not found") && error_lower.contains("model") {
            return "Model not found. Please check your GEMINI_MODEL configuration.".to_string();
        }

        if error_lower.contains("safety") {
            return "Request blocked by safety settings.".to_string();
        }

        error_detail.to_string()
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn complete(
        &self,
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Result<UnifiedResponse, ProviderError> {
        let request_model = options.model.clone().unwrap_or_else(|| self.model.clone());

        let (system_instruction, contents) = split_for_gemini(messages);

        let request = GeminiGenerateRequest {
            system_instruction,
            contents,
            generation_config: Some(GeminiGenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
                response_mime_type: options
                    .json_mode
                    .then(|| "application/json".to_string()),
            }),
        };

        debug!(
            provider = "gemini",
            model = %request_model,
            message_count = request.contents.len(),
            content_len = request
                .contents
                .iter()
                .flat_map(|c| c.parts.iter())
                .map(|p| p.text.len())
                .sum::<usize>(),
            "dispatching chat completion"
        );

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request_model
        );
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
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
                400 | 404 => ProviderError::BadRequest(classified_error),
                _ => ProviderError::ApiError {
                    status: status.as_u16(),
                    message: classified_error,
                },
            });
        }

        let completion: GeminiGenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Failed to parse response: {}", e)))?;

        let candidate =
            completion
                .candidates
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::EmptyResponse {
                    provider: AiProvider::Gemini,
                    finish_reason: "no_candidates".to_string(),
                })?;

        let finish_reason = candidate
            .finish_reason
            .unwrap_or_else(|| "unknown".to_string());

        let content = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: AiProvider::Gemini,
                finish_reason,
            });
        }

        debug!(
            provider = "gemini",
            finish_reason = %finish_reason,
            content_len = content.len(),
            "received chat completion"
        );

        Ok(UnifiedResponse {
            content,
            provider: AiProvider::Gemini,
            model: request_model,
            fell_back: false,
        })
    }

    fn provider(&self) -> AiProvider {
        AiProvider::Gemini
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_quota_error() {
        let result = GeminiClient::classify_error("RESOURCE_EXHAUSTED: quota exceeded");
        assert!(result.contains("quota"));
    }

    #[test]
    fn test_classify_safety_error() {
        let result = GeminiClient::classify_error("blocked due to safety");
        assert!(result.contains("safety"));
    }
}
