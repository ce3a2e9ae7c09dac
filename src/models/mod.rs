//! Data models for unified and vendor wire formats

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod unified;
