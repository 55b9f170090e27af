//! Strict JSON decoding of model output

use crate::config::ParserConfig;
use crate::error::DecodeError;
use crate::fence::strip_markdown;
use crate::format::{render, FailureContext};
use crate::logging::log_preview;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Strip fences from `raw_text` and decode the result as JSON
///
/// Decoding is all-or-nothing: trailing commas, single quotes, comments and
/// trailing text are all rejected. Any syntactically valid document is
/// accepted, including numbers outside the `f64` range and arbitrarily deep
/// nesting.
///
/// ```rust
/// use response_parser::parse_json;
///
/// let value = parse_json("```json\n{\"done\": true, \"response\": \"ok\"}\n```").unwrap();
/// assert_eq!(value["response"], "ok");
///
/// let err = parse_json(r#"{ "tool": "test", }"#).unwrap_err();
/// assert!(err.message().contains("Common fixes:"));
/// ```
pub fn parse_json(raw_text: &str) -> Result<Value, DecodeError> {
    decode(raw_text, &ParserConfig::default())
}

pub(crate) fn decode(raw_text: &str, config: &ParserConfig) -> Result<Value, DecodeError> {
    if config.log_raw_responses {
        debug!(raw = %log_preview(raw_text), "Decoding model response");
    }

    let stripped = strip_markdown(raw_text);
    debug!(
        raw_len = raw_text.len(),
        stripped_len = stripped.len(),
        "Stripped markdown fences"
    );

    from_str_unbounded(&stripped).map_err(|cause| {
        warn!(
            line = cause.line(),
            column = cause.column(),
            "Model response is not valid JSON: {}",
            cause
        );
        let message = render(
            FailureContext::Decode(&cause),
            raw_text,
            config.max_received_chars,
        );
        DecodeError::new(message, raw_text, stripped, cause)
    })
}

/// Strict parse without serde_json's nesting limit
///
/// Deep documents grow the stack on the heap instead of overflowing it.
fn from_str_unbounded(text: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}
