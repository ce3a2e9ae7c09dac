//! Vendor adapter implementations

pub mod claude;
pub mod gemini;
pub mod gpt;
pub mod grok;

pub use claude::ClaudeClient;
pub use gemini::GeminiClient;
pub use gpt::GptClient;
pub use grok::GrokClient;
