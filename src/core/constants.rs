//! Constants for wire-format roles, defaults, and vendor endpoints

/// Wire-format message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";

    /// Assistant role identifier
    pub const ASSISTANT: &str = "assistant";

    /// System role identifier
    pub const SYSTEM: &str = "system";

    /// Gemini's name for the assistant role
    pub const MODEL: &str = "model";
}

/// Default model identifiers, overridable per vendor via configuration
pub mod model {
    pub const GPT: &str = "gpt-4o";
    pub const CLAUDE: &str = "claude-3-5-sonnet-20241022";
    pub const GROK: &str = "grok-2-latest";
    pub const GEMINI: &str = "gemini-2.0-flash";
}

/// Default vendor API base URLs
pub mod base_url {
    pub const OPENAI: &str = "https://api.openai.com/v1";
    pub const ANTHROPIC: &str = "https://api.anthropic.com";
    pub const XAI: &str = "https://api.x.ai/v1";
    pub const GEMINI: &str = "https://generativelanguage.googleapis.com";
}

/// GPT ignores caller temperature; the request always carries this value
pub const GPT_FIXED_TEMPERATURE: f32 = 1.0;

/// Default output-token budget for Claude when the caller sets no cap
pub const CLAUDE_DEFAULT_MAX_TOKENS: u32 = 8192;

/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Model name reported on fan-out placeholder entries for failed providers
pub const ERROR_MODEL: &str = "error";
