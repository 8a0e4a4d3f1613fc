//! Configuration loading with hierarchical merging.

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The log level is not one tracing understands.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// The log format is not supported.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// A remote API URL is empty.
    #[error("API URL for {0} cannot be empty")]
    EmptyApiUrl(&'static str),

    /// The output token cap is zero.
    #[error("max_tokens cannot be 0")]
    ZeroMaxTokens,

    /// A request timeout is zero.
    #[error("Timeout for {0} cannot be 0 seconds")]
    ZeroTimeout(&'static str),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `issuebrief.yaml` in the working directory (optional)
    /// 3. Environment variables (`ISSUEBRIEF_` prefix, `__` separator)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("issuebrief.yaml"))
            .merge(Env::prefixed("ISSUEBRIEF_").split("__"))
            .extract()
            .context("Failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, then environment.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("ISSUEBRIEF_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
        match config.logging.format.as_str() {
            "json" | "pretty" => {}
            other => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
        if config.linear.api_url.is_empty() {
            return Err(ConfigError::EmptyApiUrl("linear"));
        }
        if config.anthropic.api_url.is_empty() {
            return Err(ConfigError::EmptyApiUrl("anthropic"));
        }
        if config.anthropic.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }
        if config.linear.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("linear"));
        }
        if config.anthropic.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("anthropic"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = Config::default();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let config = Config {
            logging: crate::domain::models::LoggingConfig {
                level: "verbose".to_string(),
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn bad_log_format_is_rejected() {
        let config = Config {
            logging: crate::domain::models::LoggingConfig {
                format: "xml".to_string(),
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn empty_api_url_is_rejected() {
        let config = Config {
            linear: crate::domain::models::LinearConfig {
                api_url: String::new(),
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyApiUrl("linear"))
        ));
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let config = Config {
            anthropic: crate::domain::models::AnthropicConfig {
                max_tokens: 0,
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ZeroMaxTokens)
        ));
    }
}
