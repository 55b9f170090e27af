//! Parser configuration
//!
//! Configuration follows the workspace pattern of a [`ConfigBuilder`] trait
//! plus small environment helpers. All variables share the `AGENT_PARSER_`
//! prefix:
//!
//! | variable | field | default |
//! |----------|-------|---------|
//! | `AGENT_PARSER_MAX_RECEIVED_CHARS` | `max_received_chars` | 200 |
//! | `AGENT_PARSER_LOG_RAW_RESPONSES` | `log_raw_responses` | false |
//! | `AGENT_PARSER_LOG_LEVEL` | `log_level` | `info` |
//!
//! # Example
//!
//! ```rust,ignore
//! use response_parser::config::{ConfigBuilder, ParserConfig, ENV_PREFIX};
//!
//! let config = ParserConfig::from_env_with_defaults(ENV_PREFIX)?;
//! ```

mod builder;
mod env;

pub use builder::ConfigBuilder;
pub use env::{build_env_key, get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or};

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Prefix shared by all parser environment variables
pub const ENV_PREFIX: &str = "AGENT_PARSER_";

/// Default length above which echoed input is elided
pub const DEFAULT_MAX_RECEIVED_CHARS: usize = 200;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Response parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Longest input echoed in full in a `Received:` block
    pub max_received_chars: usize,
    /// Log (sanitized) raw model output at debug level
    pub log_raw_responses: bool,
    /// Log level for binaries embedding the parser
    pub log_level: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_received_chars: DEFAULT_MAX_RECEIVED_CHARS,
            log_raw_responses: false,
            log_level: "info".to_string(),
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the echo limit for `Received:` blocks
    pub fn with_max_received_chars(mut self, max: usize) -> Self {
        self.max_received_chars = max;
        self
    }

    /// Enable or disable raw response logging
    pub fn with_log_raw_responses(mut self, enabled: bool) -> Self {
        self.log_raw_responses = enabled;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl ConfigBuilder for ParserConfig {
    fn validate(&self) -> Result<()> {
        if self.max_received_chars == 0 {
            return Err(ConfigError::Invalid(
                "max_received_chars must be greater than zero".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        Ok(())
    }

    fn from_env(prefix: &str) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            max_received_chars: get_env_parse_or(
                &build_env_key(prefix, "max_received_chars"),
                defaults.max_received_chars,
            )?,
            log_raw_responses: get_env_bool(&build_env_key(prefix, "log_raw_responses"))?
                .unwrap_or(defaults.log_raw_responses),
            log_level: get_env_or(&build_env_key(prefix, "log_level"), defaults.log_level)?
                .to_lowercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env as std_env;

    #[test]
    fn test_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.max_received_chars, 200);
        assert!(!config.log_raw_responses);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ParserConfig::new()
            .with_max_received_chars(50)
            .with_log_raw_responses(true)
            .with_log_level("debug");

        assert_eq!(config.max_received_chars, 50);
        assert!(config.log_raw_responses);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let config = ParserConfig::new().with_max_received_chars(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let config = ParserConfig::new().with_log_level("verbose");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_missing_uses_defaults() {
        let config = ParserConfig::from_env("PARSER_TEST_MISSING_").unwrap();
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_from_env_with_defaults() {
        std_env::set_var("PARSER_TEST_ENV_MAX_RECEIVED_CHARS", "64");
        std_env::set_var("PARSER_TEST_ENV_LOG_RAW_RESPONSES", "yes");
        std_env::set_var("PARSER_TEST_ENV_LOG_LEVEL", "DEBUG");

        let config = ParserConfig::from_env_with_defaults("PARSER_TEST_ENV_").unwrap();
        assert_eq!(config.max_received_chars, 64);
        assert!(config.log_raw_responses);
        assert_eq!(config.log_level, "debug");

        std_env::remove_var("PARSER_TEST_ENV_MAX_RECEIVED_CHARS");
        std_env::remove_var("PARSER_TEST_ENV_LOG_RAW_RESPONSES");
        std_env::remove_var("PARSER_TEST_ENV_LOG_LEVEL");
    }

    #[test]
    fn test_from_env_with_defaults_validates() {
        std_env::set_var("PARSER_TEST_ZERO_MAX_RECEIVED_CHARS", "0");
        let result = ParserConfig::from_env_with_defaults("PARSER_TEST_ZERO_");
        assert!(result.is_err());
        std_env::remove_var("PARSER_TEST_ZERO_MAX_RECEIVED_CHARS");
    }
}
