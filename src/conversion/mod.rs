//! Format translation between the unified schema and vendor wire formats

pub mod anthropic;
pub mod gemini;
pub mod json_extract;
pub mod openai;
