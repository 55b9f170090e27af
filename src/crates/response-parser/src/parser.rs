//! End-to-end interpretation

use crate::classify::{validate_response, Classification};
use crate::config::ParserConfig;
use crate::decode::decode;
use crate::error::{DecodeError, InterpretError, ValidationFailure};
use crate::fence::strip_markdown;
use crate::format::{render, FailureContext};
use crate::schemas::ParsedResponse;
use serde_json::Value;
use tracing::{debug, info};

/// Configured entry point for the parsing pipeline
///
/// # Example
///
/// ```rust
/// use response_parser::{ParserConfig, ResponseParser};
///
/// let parser = ResponseParser::new(ParserConfig::default().with_max_received_chars(80));
/// let err = parser.interpret(r#"{"done": false}"#).unwrap_err();
/// assert!(err.feedback().starts_with("Response did not match any expected format:"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseParser {
    config: ParserConfig,
}

impl ResponseParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn strip(&self, raw_text: &str) -> String {
        strip_markdown(raw_text)
    }

    pub fn parse_json(&self, raw_text: &str) -> Result<Value, DecodeError> {
        decode(raw_text, &self.config)
    }

    pub fn validate(&self, value: &Value) -> Classification {
        validate_response(value)
    }

    /// Strip, decode and classify in one step
    ///
    /// Validation failures echo `raw_text` (not the stripped text) in their
    /// Received block.
    pub fn interpret(&self, raw_text: &str) -> Result<ParsedResponse, InterpretError> {
        let value = self.parse_json(raw_text)?;

        match self.validate(&value) {
            Classification::Matched(parsed) => {
                info!(shape = %parsed.kind(), "Interpreted model response");
                Ok(parsed)
            }
            Classification::Unmatched { errors, diagnostic } => {
                debug!(shape = diagnostic.shape(), "Rendering validation feedback");
                let message = render(
                    FailureContext::Validation(&errors),
                    raw_text,
                    self.config.max_received_chars,
                );
                Err(ValidationFailure::new(message, errors, diagnostic).into())
            }
        }
    }
}

/// Interpret raw model output with the default configuration
pub fn interpret(raw_text: &str) -> Result<ParsedResponse, InterpretError> {
    ResponseParser::default().interpret(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ShapeKind;

    #[test]
    fn test_interpret_fenced_tool_call() {
        let raw = "```json\n{\"tool\": \"file_read\", \"args\": {\"path\": \"test.txt\"}}\n```";
        let parsed = interpret(raw).unwrap();

        let call = parsed.as_tool_call().unwrap();
        assert_eq!(call.tool, "file_read");
        assert_eq!(call.args["path"], "test.txt");
    }

    #[test]
    fn test_interpret_completion() {
        let parsed = interpret(r#"{"done": true, "response": "All done!"}"#).unwrap();
        assert_eq!(parsed.kind(), ShapeKind::Completion);
        assert_eq!(parsed.as_completion().unwrap().response, "All done!");
    }

    #[test]
    fn test_interpret_decode_failure() {
        let err = interpret(r#"{ "tool": "test", }"#).unwrap_err();

        assert_eq!(err.error_code(), "E_DECODE");
        assert!(err.feedback().contains("Common fixes:"));
        assert!(matches!(err, InterpretError::Decode(_)));
    }

    #[test]
    fn test_interpret_validation_failure() {
        let raw = r#"{"done": false, "response": "Not done yet"}"#;
        let err = interpret(raw).unwrap_err();

        assert_eq!(err.error_code(), "E_VALIDATION");
        let InterpretError::Validation(failure) = &err else {
            panic!("expected validation failure, got {err:?}");
        };
        assert_eq!(failure.diagnostic().shape(), "completion");
        assert!(err.feedback().contains("\n  - Field \"done\": Invalid literal value, expected true"));
        assert!(err.feedback().contains("Expected format:"));
        assert!(!err.feedback().contains("Common fixes:"));
        assert!(err.feedback().ends_with(raw));
    }

    #[test]
    fn test_validation_feedback_echoes_raw_text() {
        let raw = "```json\n{\"args\": {}}\n```";
        let err = interpret(raw).unwrap_err();
        assert!(err.feedback().ends_with(raw));
    }

    #[test]
    fn test_configured_elision() {
        let parser = ResponseParser::new(ParserConfig::default().with_max_received_chars(10));
        let raw = format!(r#"{{"unexpected": "{}"}}"#, "z".repeat(100));
        let err = parser.interpret(&raw).unwrap_err();

        assert!(err.feedback().contains("[truncated,"));
        assert!(!err.feedback().contains(&"z".repeat(20)));
    }

    #[test]
    fn test_deeply_nested_args_are_a_tool_call() {
        let raw = format!(
            r#"{{"tool":"x","args":{{"v":{}{}}}}}"#,
            "[".repeat(200),
            "]".repeat(200)
        );
        let parsed = interpret(&raw).unwrap();
        assert_eq!(parsed.as_tool_call().unwrap().tool, "x");
    }

    #[test]
    fn test_huge_number_is_not_a_decode_failure() {
        let parsed = interpret(r#"{"tool": "calc", "args": {"n": 1e400}}"#).unwrap();
        assert_eq!(parsed.as_tool_call().unwrap().args["n"].to_string(), "1e400");
    }

    #[test]
    fn test_stages_are_exposed() {
        let parser = ResponseParser::default();
        assert_eq!(parser.strip("```json\n{}\n```"), "{}");

        let value = parser.parse_json("{}").unwrap();
        assert!(!parser.validate(&value).is_matched());
    }
}
