//! Error types for response interpretation

use crate::validation::ValidationError;
use thiserror::Error;

/// Stripped text was not syntactically valid JSON.
///
/// Carries the verbatim model output, the text that actually reached the
/// decoder, and the underlying syntax error. The display form is the full
/// remediation message, suitable for sending back to the model.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
    raw_text: String,
    stripped_text: String,
    #[source]
    cause: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(
        message: String,
        raw_text: impl Into<String>,
        stripped_text: impl Into<String>,
        cause: serde_json::Error,
    ) -> Self {
        Self {
            message,
            raw_text: raw_text.into(),
            stripped_text: stripped_text.into(),
            cause,
        }
    }

    /// Rendered remediation message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Model output exactly as received
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Text fed to the decoder after fence stripping
    pub fn stripped_text(&self) -> &str {
        &self.stripped_text
    }

    /// Underlying syntax error
    pub fn cause(&self) -> &serde_json::Error {
        &self.cause
    }

    /// Line of the syntax error within the stripped text (1-based)
    pub fn line(&self) -> usize {
        self.cause.line()
    }

    /// Column of the syntax error within the stripped text (1-based)
    pub fn column(&self) -> usize {
        self.cause.column()
    }
}

/// Decoded JSON matched neither response shape.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    message: String,
    errors: Vec<String>,
    diagnostic: ValidationError,
}

impl ValidationFailure {
    pub(crate) fn new(message: String, errors: Vec<String>, diagnostic: ValidationError) -> Self {
        Self {
            message,
            errors,
            diagnostic,
        }
    }

    /// Field-level messages, in report order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Structured diagnostic of the surfaced shape
    pub fn diagnostic(&self) -> &ValidationError {
        &self.diagnostic
    }
}

/// Failure of the full strip → decode → classify pipeline
#[derive(Debug, Error)]
pub enum InterpretError {
    /// Output was not valid JSON
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Output was JSON but not a recognized response
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl InterpretError {
    /// Text to hand back to the model when re-prompting
    pub fn feedback(&self) -> &str {
        match self {
            Self::Decode(err) => err.message(),
            Self::Validation(failure) => &failure.message,
        }
    }

    /// Canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "E_DECODE",
            Self::Validation(_) => "E_VALIDATION",
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable is set but is not valid UTF-8
    #[error("Environment variable {0} contains invalid UTF-8")]
    InvalidUnicode(String),

    /// Variable is set but does not parse into the expected type
    #[error("Failed to parse environment variable {key}: {message}")]
    Parse { key: String, message: String },

    /// Variable is set but is not a recognized boolean
    #[error("Invalid boolean value for {key}: {value}")]
    InvalidBool { key: String, value: String },

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn syntax_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{,}").unwrap_err()
    }

    #[test]
    fn test_decode_error_exposes_source() {
        let err = DecodeError::new("bad json".into(), "```{,}```", "{,}", syntax_error());

        assert_eq!(err.to_string(), "bad json");
        assert_eq!(err.raw_text(), "```{,}```");
        assert_eq!(err.stripped_text(), "{,}");
        assert_eq!(err.line(), 1);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_interpret_error_codes() {
        let err = InterpretError::from(DecodeError::new(
            "bad json".into(),
            "",
            "",
            syntax_error(),
        ));
        assert_eq!(err.error_code(), "E_DECODE");
        assert_eq!(err.feedback(), "bad json");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidBool {
            key: "AGENT_PARSER_LOG_RAW".into(),
            value: "maybe".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid boolean value for AGENT_PARSER_LOG_RAW: maybe"
        );
    }
}
