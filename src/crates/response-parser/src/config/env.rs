//! Environment variable loading utilities

use crate::error::{ConfigError, Result};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists
/// * `Ok(None)` if variable doesn't exist
/// * `Err` if variable exists but has invalid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidUnicode(key.to_string())),
    }
}

/// Load and parse an environment variable
///
/// # Example
///
/// ```rust,ignore
/// let limit: Option<usize> = get_env_parse("AGENT_PARSER_MAX_RECEIVED_CHARS")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => {
            let parsed = val.trim().parse::<T>().map_err(|e| ConfigError::Parse {
                key: key.to_string(),
                message: e.to_string(),
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Load an environment variable with a default value
pub fn get_env_or(key: &str, default: impl Into<String>) -> Result<String> {
    Ok(get_env(key)?.unwrap_or_else(|| default.into()))
}

/// Load and parse an environment variable with a default value
///
/// The default only applies when the variable is missing; a value that
/// fails to parse is still an error.
pub fn get_env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_parse(key)?.unwrap_or(default))
}

/// Load a boolean environment variable
///
/// Recognizes "true", "1", "yes", "on" and "false", "0", "no", "off"
/// (case-insensitive).
pub fn get_env_bool(key: &str) -> Result<Option<bool>> {
    match get_env(key)? {
        Some(val) => {
            let result = match val.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidBool {
                        key: key.to_string(),
                        value: val,
                    })
                }
            };
            Ok(Some(result))
        }
        None => Ok(None),
    }
}

/// Build a prefixed environment variable name
///
/// ```rust
/// use response_parser::config::build_env_key;
///
/// assert_eq!(build_env_key("AGENT_PARSER_", "log_level"), "AGENT_PARSER_LOG_LEVEL");
/// ```
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}
