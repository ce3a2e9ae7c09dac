//! A.IDEAL provider router
//!
//! Normalizes chat-completion requests across four AI vendor backends
//! (GPT/OpenAI, Claude/Anthropic, Grok/xAI, Gemini/Google), maps logical
//! task types to a preferred vendor, and returns a uniform response
//! envelope. Supports concurrent multi-provider fan-out for comparison.
//!
//! The router is a stateless function library: adapter clients are built
//! once from configuration and shared immutably across calls. A missing
//! credential for a non-GPT vendor is not an error; those requests fall
//! back to GPT and the substitution is flagged on the response.

pub mod conversion;
pub mod core;
pub mod models;

pub use crate::conversion::json_extract::extract_json_payload;
pub use crate::core::config::{Config, VendorConfig};
pub use crate::core::logging::init_logging;
pub use crate::core::provider::{AiProvider, ChatBackend, ProviderError, RouterError, TaskType};
pub use crate::core::router::Router;
pub use crate::models::unified::{GenerationOptions, Role, UnifiedMessage, UnifiedResponse};
