//! Provider identity, task routing table, and error types
//!
//! The four supported vendors form a closed enum so that every dispatch over
//! provider identity is checked for exhaustiveness at compile time; adding a
//! fifth vendor is flagged everywhere the enum is matched.

use crate::models::unified::{GenerationOptions, UnifiedMessage, UnifiedResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for vendor adapter operations
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("{provider} returned an empty response (finish reason: {finish_reason})")]
    EmptyResponse {
        provider: AiProvider,
        finish_reason: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors surfaced by the router itself
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown task type: {0}")]
    UnknownTask(String),

    #[error("No credential configured for provider: {0}")]
    NotConfigured(AiProvider),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Trait implemented by every vendor adapter
///
/// Each call is one stateless request/response round trip: no retries, no
/// internal state between calls.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send a chat completion request and normalize the response
    async fn complete(
        &self,
        messages: &[UnifiedMessage],
        options: &GenerationOptions,
    ) -> Result<UnifiedResponse, ProviderError>;

    /// The provider identity this adapter serves
    fn provider(&self) -> AiProvider;
}

/// Supported AI vendor backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Gpt,
    Claude,
    Grok,
    Gemini,
}

impl AiProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gpt" | "openai" => Some(AiProvider::Gpt),
            "claude" | "anthropic" => Some(AiProvider::Claude),
            "grok" | "xai" => Some(AiProvider::Grok),
            "gemini" | "google" => Some(AiProvider::Gemini),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Gpt => "gpt",
            AiProvider::Claude => "claude",
            AiProvider::Grok => "grok",
            AiProvider::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical task categories, each statically bound to one preferred provider
///
/// The mapping is process-wide constant configuration with no runtime
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    PromptGeneration,
    QuestionGeneration,
    PromptAnalysis,
    CodeGeneration,
    LearningContent,
    TrendAnalysis,
}

impl TaskType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "prompt_generation" => Some(TaskType::PromptGeneration),
            "question_generation" => Some(TaskType::QuestionGeneration),
            "prompt_analysis" => Some(TaskType::PromptAnalysis),
            "code_generation" => Some(TaskType::CodeGeneration),
            "learning_content" => Some(TaskType::LearningContent),
            "trend_analysis" => Some(TaskType::TrendAnalysis),
            _ => None,
        }
    }

    /// Preferred provider for this task
    pub fn preferred_provider(&self) -> AiProvider {
        match self {
            TaskType::PromptGeneration => AiProvider::Gpt,
            TaskType::QuestionGeneration => AiProvider::Claude,
            TaskType::PromptAnalysis => AiProvider::Claude,
            TaskType::CodeGeneration => AiProvider::Grok,
            TaskType::LearningContent => AiProvider::Gpt,
            TaskType::TrendAnalysis => AiProvider::Gemini,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(AiProvider::from_str("gpt"), Some(AiProvider::Gpt));
        assert_eq!(AiProvider::from_str("Claude"), Some(AiProvider::Claude));
        assert_eq!(AiProvider::from_str("xai"), Some(AiProvider::Grok));
        assert_eq!(AiProvider::from_str("google"), Some(AiProvider::Gemini));
        assert_eq!(AiProvider::from_str("mistral"), None);
    }

    #[test]
    fn test_provider_round_trip() {
        for p in [
            AiProvider::Gpt,
            AiProvider::Claude,
            AiProvider::Grok,
            AiProvider::Gemini,
        ] {
            assert_eq!(AiProvider::from_str(p.as_str()), Some(p));
        }
    }

    #[test]
    fn test_task_from_str() {
        assert_eq!(
            TaskType::from_str("question_generation"),
            Some(TaskType::QuestionGeneration)
        );
        assert_eq!(TaskType::from_str("poetry_generation"), None);
    }

    #[test]
    fn test_task_table() {
        assert_eq!(
            TaskType::TrendAnalysis.preferred_provider(),
            AiProvider::Gemini
        );
        assert_eq!(
            TaskType::CodeGeneration.preferred_provider(),
            AiProvider::Grok
        );
    }
}
