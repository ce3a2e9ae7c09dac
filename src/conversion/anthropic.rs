//! Unified to Anthropic Messages API conversion
//!
//! The Messages API models system instructions out-of-band: all
//! system/developer entries are flattened into one system string, and the
//! remaining turns must strictly alternate user/assistant. Anthropic has no
//! native JSON mode, so when the caller requests one the conversion appends
//! explicit instructions to both the system prompt and the final user turn.

use crate::core::constants::role;
use crate::models::anthropic::AnthropicMessage;
use crate::models::unified::{Role, UnifiedMessage};

/// Instruction appended to the system prompt when JSON output is requested
const JSON_SYSTEM_INSTRUCTION: &str =
    "You must respond with raw JSON only. Do not wrap the output in markdown \
     code fences and do not add any prose before or after the JSON.";

/// Instruction appended to the final user message when JSON output is requested
const JSON_USER_INSTRUCTION: &str =
    "Respond with raw JSON only, with no markdown fencing.";

/// Split unified messages into a system string and alternating turns
///
/// System and developer entries (wherever they appear) are concatenated into
/// the single out-of-band system string. Consecutive same-role turns are
/// merged so the resulting list strictly alternates user/assistant.
pub fn split_for_anthropic(
    messages: &[UnifiedMessage],
) -> (Option<String>, Vec<AnthropicMessage>) {
    let mut system_parts: Vec<&str> = Vec::new();
    let mut turns: Vec<AnthropicMessage> = Vec::new();

    for msg in messages {
        match msg.role {
            Role::System | Role::Developer => system_parts.push(&msg.content),
            Role::User | Role::Assistant => {
                let wire_role = match msg.role {
                    Role::User => role::USER,
                    _ => role::ASSISTANT,
                };
                match turns.last_mut() {
                    Some(last) if last.role == wire_role => {
                        last.content.push_str("\n\n");
                        last.content.push_str(&msg.content);
                    }
                    _ => turns.push(AnthropicMessage {
                        role: wire_role.to_string(),
                        content: msg.content.clone(),
                    }),
                }
            }
        }
    }

    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };

    (system, turns)
}

/// Append JSON-mode instructions to the system string and final user turn
pub fn apply_json_instructions(
    system: Option<String>,
    mut turns: Vec<AnthropicMessage>,
) -> (Option<String>, Vec<AnthropicMessage>) {
    let system = match system {
        Some(s) => Some(format!("{}\n\n{}", s, JSON_SYSTEM_INSTRUCTION)),
        None => Some(JSON_SYSTEM_INSTRUCTION.to_string()),
    };

    if let Some(last_user) = turns.iter_mut().rev().find(|t| t.role == role::USER) {
        last_user.content.push_str("\n\n");
        last_user.content.push_str(JSON_USER_INSTRUCTION);
    }

    (system, turns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_and_developer_coalesced() {
        let messages = vec![
            UnifiedMessage::system("first instruction"),
            UnifiedMessage::developer("second instruction"),
            UnifiedMessage::user("hello"),
        ];
        let (system, turns) = split_for_anthropic(&messages);
        assert_eq!(
            system.as_deref(),
            Some("first instruction\n\nsecond instruction")
        );
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, "user");
    }

    #[test]
    fn test_consecutive_turns_merged() {
        let messages = vec![
            UnifiedMessage::user("part one"),
            UnifiedMessage::user("part two"),
            UnifiedMessage::assistant("reply"),
            UnifiedMessage::user("follow up"),
        ];
        let (_, turns) = split_for_anthropic(&messages);
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content, "part one\n\npart two");
        assert_eq!(turns[1].role, "assistant");
        assert_eq!(turns[2].content, "follow up");
    }

    #[test]
    fn test_alternation_holds_across_interleaved_system() {
        let messages = vec![
            UnifiedMessage::user("a"),
            UnifiedMessage::system("ignored here"),
            UnifiedMessage::user("b"),
        ];
        let (system, turns) = split_for_anthropic(&messages);
        assert!(system.is_some());
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "a\n\nb");
    }

    #[test]
    fn test_no_system_entries() {
        let messages = vec![UnifiedMessage::user("hello")];
        let (system, turns) = split_for_anthropic(&messages);
        assert!(system.is_none());
        assert_eq!(turns.len(), 1);
    }

    #[test]
    fn test_json_instructions_appended() {
        let (system, turns) = apply_json_instructions(
            Some("base".to_string()),
            vec![
                AnthropicMessage {
                    role: "user".to_string(),
                    content: "give me data".to_string(),
                },
                AnthropicMessage {
                    role: "assistant".to_string(),
                    content: "ok".to_string(),
                },
            ],
        );
        let system = system.unwrap();
        assert!(system.starts_with("base"));
        assert!(system.contains("raw JSON"));
        // Instructions land on the last USER turn, not the trailing assistant
        assert!(turns[0].content.contains("no markdown fencing"));
        assert_eq!(turns[1].content, "ok");
    }

    #[test]
    fn test_json_instructions_without_system() {
        let (system, _) = apply_json_instructions(None, vec![]);
        assert!(system.unwrap().contains("raw JSON"));
    }
}
