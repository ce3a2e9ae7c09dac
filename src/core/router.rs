//! Provider router
//!
//! Accepts a provider-agnostic message list, selects and invokes one of the
//! four vendor adapters, and returns a normalized response. The router holds
//! no state between calls: each adapter client is constructed once from
//! configuration and shared immutably across concurrent requests.

use crate::core::config::Config;
use crate::core::constants::ERROR_MODEL;
use crate::core::provider::{AiProvider, ChatBackend, RouterError, TaskType};
use crate::core::providers::{ClaudeClient, GeminiClient, GptClient, GrokClient};
use crate::models::unified::{GenerationOptions, Role, UnifiedMessage, UnifiedResponse};
use futures::future;
use tracing::{error, warn};

/// Stateless request router over the four vendor adapters
///
/// A `None` adapter slot means no credential was configured for that vendor.
/// Requests for Claude, Grok, or Gemini without a credential fall back to GPT
/// transparently; the substitution is surfaced on the response via
/// `fell_back`.
pub struct Router {
    gpt: Option<GptClient>,
    claude: Option<ClaudeClient>,
    grok: Option<GrokClient>,
    gemini: Option<GeminiClient>,
}

impl Router {
    /// Build a router from configuration, constructing one client per
    /// configured vendor
    pub fn new(config: &Config) -> Self {
        let timeout = config.request_timeout;

        Self {
            gpt: config.openai.as_ref().map(|v| {
                GptClient::new(
                    v.api_key.clone(),
                    v.base_url.clone(),
                    v.model.clone(),
                    timeout,
                )
            }),
            claude: config.anthropic.as_ref().map(|v| {
                ClaudeClient::new(
                    v.api_key.clone(),
                    v.base_url.clone(),
                    v.model.clone(),
                    timeout,
                )
            }),
            grok: config.xai.as_ref().map(|v| {
                GrokClient::new(
                    v.api_key.clone(),
                    v.base_url.clone(),
                    v.model.clone(),
                    timeout,
                )
            }),
            gemini: config.gemini.as_ref().map(|v| {
                GeminiClient::new(
                    v.api_key.clone(),
                    v.base_url.clone(),
                    v.model.clone(),
                    timeout,
                )
            }),
        }
    }

    /// Generate a completion with the requested provider
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the message list is empty or has no user
    /// entry, `NotConfigured` if GPT is needed (directly or as the fallback
    /// target) but has no credential, and any adapter error unchanged.
    pub async fn generate_with_ai(
        &self,
        provider: AiProvider,
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Result<UnifiedResponse, RouterError> {
        validate_messages(messages)?;

        let (backend, fell_back): (&dyn ChatBackend, bool) = match provider {
            AiProvider::Gpt => (self.gpt()?, false),
            AiProvider::Claude => match &self.claude {
                Some(client) => (client, false),
                None => {
                    warn!("No Anthropic credential configured, falling back to GPT");
                    (self.gpt()?, true)
                }
            },
            AiProvider::Grok => match &self.grok {
                Some(client) => (client, false),
                None => {
                    warn!("No xAI credential configured, falling back to GPT");
                    (self.gpt()?, true)
                }
            },
            AiProvider::Gemini => match &self.gemini {
                Some(client) => (client, false),
                None => {
                    warn!("No Gemini credential configured, falling back to GPT");
                    (self.gpt()?, true)
                }
            },
        };

        let mut response = backend.complete(messages, options).await.map_err(|e| {
            error!(provider = %backend.provider(), error = %e, "chat completion failed");
            e
        })?;
        response.fell_back = fell_back;

        Ok(response)
    }

    /// Generate a completion with the provider preferred for a task
    ///
    /// The task identifier is matched against the closed task table; an
    /// unrecognized identifier is an error, never a silent default.
    pub async fn generate_for_task(
        &self,
        task: &str,
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Result<UnifiedResponse, RouterError> {
        let task_type =
            TaskType::from_str(task).ok_or_else(|| RouterError::UnknownTask(task.to_string()))?;

        self.generate_with_ai(task_type.preferred_provider(), messages, options)
            .await
    }

    /// Fan a request out to several providers concurrently
    ///
    /// The output always has one entry per input provider, in input order,
    /// regardless of completion order. A failed provider yields an inert
    /// placeholder (`model == "error"`, empty content) instead of aborting
    /// the batch.
    pub async fn generate_with_multiple_ais(
        &self,
        providers: &[AiProvider],
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Vec<UnifiedResponse> {
        let calls = providers
            .iter()
            .map(|p| self.generate_with_ai(*p, messages, options));
        let results = future::join_all(calls).await;

        providers
            .iter()
            .zip(results)
            .map(|(provider, result)| {
                result.unwrap_or_else(|e| {
                    warn!(provider = %provider, error = %e, "fan-out provider failed");
                    UnifiedResponse {
                        content: String::new(),
                        provider: *provider,
                        model: ERROR_MODEL.to_string(),
                        fell_back: false,
                    }
                })
            })
            .collect()
    }

    fn gpt(&self) -> Result<&GptClient, RouterError> {
        self.gpt
            .as_ref()
            .ok_or(RouterError::NotConfigured(AiProvider::Gpt))
    }
}

/// Reject message lists the adapters cannot meaningfully send
fn validate_messages(messages: &[UnifiedMessage]) -> Result<(), RouterError> {
    if messages.is_empty() {
        return Err(RouterError::InvalidRequest(
            "message list is empty".to_string(),
        ));
    }
    if !messages.iter().any(|m| m.role == Role::User) {
        return Err(RouterError::InvalidRequest(
            "message list contains no user message".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::VendorConfig;
    use crate::core::constants::DEFAULT_REQUEST_TIMEOUT;

    fn empty_config() -> Config {
        Config {
            openai: None,
            anthropic: None,
            xai: None,
            gemini: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_level: "info".to_string(),
        }
    }

    fn gpt_only_config() -> Config {
        Config {
            openai: Some(VendorConfig {
                api_key: "sk-test".to_string(),
                base_url: None,
                model: None,
            }),
            ..empty_config()
        }
    }

    #[tokio::test]
    async fn test_empty_messages_rejected() {
        let router = Router::new(&gpt_only_config());
        let result = router
            .generate_with_ai(AiProvider::Gpt, &[], &GenerationOptions::default())
            .await;
        assert!(matches!(result, Err(RouterError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_no_user_message_rejected() {
        let router = Router::new(&gpt_only_config());
        let messages = vec![UnifiedMessage::system("only instructions")];
        let result = router
            .generate_with_ai(AiProvider::Gpt, &messages, &GenerationOptions::default())
            .await;
        assert!(matches!(result, Err(RouterError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_unknown_task_errors() {
        let router = Router::new(&gpt_only_config());
        let messages = vec![UnifiedMessage::user("hi")];
        let result = router
            .generate_for_task("poetry_generation", &messages, &GenerationOptions::default())
            .await;
        assert!(matches!(result, Err(RouterError::UnknownTask(_))));
    }

    #[tokio::test]
    async fn test_gpt_unconfigured_errors() {
        let router = Router::new(&empty_config());
        let messages = vec![UnifiedMessage::user("hi")];
        let result = router
            .generate_with_ai(AiProvider::Gpt, &messages, &GenerationOptions::default())
            .await;
        assert!(matches!(
            result,
            Err(RouterError::NotConfigured(AiProvider::Gpt))
        ));
    }

    #[tokio::test]
    async fn test_fallback_target_unconfigured_errors() {
        // Claude has no credential and neither does the GPT fallback target
        let router = Router::new(&empty_config());
        let messages = vec![UnifiedMessage::user("hi")];
        let result = router
            .generate_with_ai(AiProvider::Claude, &messages, &GenerationOptions::default())
            .await;
        assert!(matches!(
            result,
            Err(RouterError::NotConfigured(AiProvider::Gpt))
        ));
    }

    #[tokio::test]
    async fn test_fan_out_with_no_backends_yields_placeholders() {
        let router = Router::new(&empty_config());
        let messages = vec![UnifiedMessage::user("hi")];
        let providers = [AiProvider::Gpt, AiProvider::Claude, AiProvider::Grok];
        let results = router
            .generate_with_multiple_ais(&providers, &messages, &GenerationOptions::default())
            .await;
        assert_eq!(results.len(), 3);
        for (result, provider) in results.iter().zip(providers) {
            assert_eq!(result.model, ERROR_MODEL);
            assert!(result.content.is_empty());
            assert_eq!(result.provider, provider);
        }
    }
}
