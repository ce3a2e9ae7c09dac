//! Unified to Gemini generateContent conversion
//!
//! Gemini accepts a single `systemInstruction` entry separate from the
//! turn-based `contents` list, and names the assistant role `model`.

use crate::core::constants::role;
use crate::models::gemini::GeminiContent;
use crate::models::unified::{Role, UnifiedMessage};

/// Split unified messages into a system instruction and Gemini contents
///
/// System and developer entries are concatenated into the single
/// `systemInstruction` field; `assistant` maps to the vendor's `model` role.
pub fn split_for_gemini(
    messages: &[UnifiedMessage],
) -> (Option<GeminiContent>, Vec<GeminiContent>) {
    let mut system_parts: Vec<&str> = Vec::new();
    let mut contents: Vec<GeminiContent> = Vec::new();

    for msg in messages {
        match msg.role {
            Role::System | Role::Developer => system_parts.push(&msg.content),
            Role::User => contents.push(GeminiContent::text(Some(role::USER), &msg.content)),
            Role::Assistant => contents.push(GeminiContent::text(Some(role::MODEL), &msg.content)),
        }
    }

    let system_instruction = if system_parts.is_empty() {
        None
    } else {
        Some(GeminiContent::text(None, system_parts.join("\n\n")))
    };

    (system_instruction, contents)
}
