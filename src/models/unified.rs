//! Provider-agnostic request and response types
//!
//! These types form the uniform surface the router exposes to callers:
//! a role-tagged message list in, a normalized response envelope out.

use crate::core::provider::AiProvider;
use serde::{Deserialize, Serialize};

/// Message role in a conversation
///
/// `Developer` is accepted at the unified layer but rewritten to `System`
/// for vendors that do not recognize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Developer,
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedMessage {
    pub role: Role,
    pub content: String,
}

impl UnifiedMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn developer(content: impl Into<String>) -> Self {
        Self {
            role: Role::Developer,
            content: content.into(),
        }
    }
}

/// Generation options recognized by every adapter
///
/// All fields are optional; each adapter supplies its own defaults and may
/// ignore options the vendor does not support (GPT pins the temperature).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub json_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Overrides the configured model name for this request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Normalized response envelope
///
/// `content` is non-empty on success; an empty vendor reply is surfaced as an
/// error, never as an empty success. `fell_back` is true when the requested
/// provider had no credential and the call was served by GPT instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedResponse {
    pub content: String,
    pub provider: AiProvider,
    pub model: String,
    #[serde(default)]
    pub fell_back: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Developer).unwrap(), "\"developer\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_message_constructors() {
        let msg = UnifiedMessage::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn test_options_default() {
        let opts = GenerationOptions::default();
        assert!(opts.temperature.is_none());
        assert!(!opts.json_mode);
        assert!(opts.max_tokens.is_none());
        assert!(opts.model.is_none());
    }
}
