//! Application configuration management
//!
//! Credentials and overrides come either from environment variables (the
//! deployment path, with `.env` support) or from a TOML file. A missing
//! credential for Claude, Grok, or Gemini is a recognized, non-fatal state:
//! the router falls back to GPT for those providers at request time.

use crate::core::constants::DEFAULT_REQUEST_TIMEOUT;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Per-vendor connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
    pub api_key: String,
    /// Overrides the vendor's default API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Overrides the vendor's default model identifier
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RequestTomlConfig {
    #[serde(default = "default_timeout")]
    timeout: u64,
}

impl Default for RequestTomlConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingTomlConfig {
    #[serde(default = "default_log_level")]
    level: String,
}

impl Default for LoggingTomlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct TomlConfig {
    #[serde(default)]
    openai: Option<VendorConfig>,
    #[serde(default)]
    anthropic: Option<VendorConfig>,
    #[serde(default)]
    xai: Option<VendorConfig>,
    #[serde(default)]
    gemini: Option<VendorConfig>,
    #[serde(default)]
    request: RequestTomlConfig,
    #[serde(default)]
    logging: LoggingTomlConfig,
}

/// Router configuration
///
/// A `None` vendor entry means no credential was supplied for that vendor.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: Option<VendorConfig>,
    pub anthropic: Option<VendorConfig>,
    pub xai: Option<VendorConfig>,
    pub gemini: Option<VendorConfig>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        Ok(Config {
            openai: config.openai,
            anthropic: config.anthropic,
            xai: config.xai,
            gemini: config.gemini,
            request_timeout: config.request.timeout,
            log_level: config.logging.level,
        })
    }

    /// Load configuration from environment variables
    ///
    /// Reads `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `XAI_API_KEY`, and
    /// `GEMINI_API_KEY`, plus per-vendor `*_MODEL` and `*_BASE_URL`
    /// overrides, `REQUEST_TIMEOUT`, and `LOG_LEVEL`. A `.env` file in the
    /// working directory is loaded first if present.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        Config {
            openai: vendor_from_env("OPENAI_API_KEY", "OPENAI_MODEL", "OPENAI_BASE_URL"),
            anthropic: vendor_from_env("ANTHROPIC_API_KEY", "ANTHROPIC_MODEL", "ANTHROPIC_BASE_URL"),
            xai: vendor_from_env("XAI_API_KEY", "XAI_MODEL", "XAI_BASE_URL"),
            gemini: vendor_from_env("GEMINI_API_KEY", "GEMINI_MODEL", "GEMINI_BASE_URL"),
            request_timeout: std::env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level()),
        }
    }

    /// List the providers that have a credential configured
    pub fn configured_vendors(&self) -> Vec<&'static str> {
        let mut vendors = Vec::new();
        if self.openai.is_some() {
            vendors.push("openai");
        }
        if self.anthropic.is_some() {
            vendors.push("anthropic");
        }
        if self.xai.is_some() {
            vendors.push("xai");
        }
        if self.gemini.is_some() {
            vendors.push("gemini");
        }
        vendors
    }
}

/// Build a vendor entry from environment variables, `None` if the key is unset
fn vendor_from_env(key_var: &str, model_var: &str, url_var: &str) -> Option<VendorConfig> {
    let api_key = std::env::var(key_var).ok().filter(|k| !k.trim().is_empty())?;
    Some(VendorConfig {
        api_key,
        base_url: std::env::var(url_var).ok(),
        model: std::env::var(model_var).ok(),
    })
}
