//! Unified to OpenAI-format message conversion
//!
//! Used by the GPT and Grok adapters. The only translation needed is the
//! role rewrite: neither vendor recognizes the `developer` role, so those
//! entries are sent as `system`.

use crate::core::constants::role;
use crate::models::openai::OpenAiMessage;
use crate::models::unified::{Role, UnifiedMessage};

/// Convert unified messages to OpenAI wire messages
///
/// `developer` entries are rewritten to `system`; no `developer` role value
/// ever reaches the vendor.
pub fn to_openai_messages(messages: &[UnifiedMessage]) -> Vec<OpenAiMessage> {
    messages
        .iter()
        .map(|msg| OpenAiMessage {
            role: match msg.role {
                Role::System | Role::Developer => role::SYSTEM.to_string(),
                Role::User => role::USER.to_string(),
                Role::Assistant => role::ASSISTANT.to_string(),
            },
            content: msg.content.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_developer_rewritten_to_system() {
        let messages = vec![
            UnifiedMessage::developer("be terse"),
            UnifiedMessage::user("hi"),
        ];
        let converted = to_openai_messages(&messages);
        assert_eq!(converted[0].role, "system");
        assert_eq!(converted[0].content, "be terse");
        assert_eq!(converted[1].role, "user");
    }

    #[test]
    fn test_no_developer_role_on_wire() {
        let messages = vec![
            UnifiedMessage::system("a"),
            UnifiedMessage::developer("b"),
            UnifiedMessage::user("c"),
            UnifiedMessage::assistant("d"),
        ];
        let converted = to_openai_messages(&messages);
        assert!(converted.iter().all(|m| m.role != "developer"));
    }

    #[test]
    fn test_order_preserved() {
        let messages = vec![
            UnifiedMessage::user("first"),
            UnifiedMessage::assistant("second"),
            UnifiedMessage::user("third"),
        ];
        let converted = to_openai_messages(&messages);
        let contents: Vec<&str> = converted.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }
}
