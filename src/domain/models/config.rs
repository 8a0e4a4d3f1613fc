//! Application configuration model.
//!
//! API keys are deliberately absent: they are entered interactively per
//! session and held only in memory.

use serde::{Deserialize, Serialize};

/// Top-level configuration, merged from defaults, an optional YAML file,
/// and `ISSUEBRIEF_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Web server settings.
    pub server: ServerConfig,
    /// Issue-tracker API settings.
    pub linear: LinearConfig,
    /// Completion API settings.
    pub anthropic: AnthropicConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Web server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Issue-tracker (Linear GraphQL) API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConfig {
    /// GraphQL endpoint URL.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.linear.app/graphql".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Completion (Anthropic Messages) API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// API base URL.
    pub api_url: String,
    /// API version header value.
    pub api_version: String,
    /// Model used for summaries.
    pub model: String,
    /// Output token cap for a summary completion.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com".to_string(),
            api_version: "2023-06-01".to_string(),
            model: "claude-3-sonnet-20240229".to_string(),
            max_tokens: 1000,
            timeout_secs: 120,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set.
    pub level: String,
    /// Output format: "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
