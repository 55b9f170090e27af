//! Response classification
//!
//! A decoded value is checked against the shapes in [`CANDIDATES`], in
//! order; the first one that matches wins. When none matches,
//! [`diagnostic_shape`] decides whose issues are reported.
//!
//! Completion comes first. A value carrying both `tool` and `done` fails
//! both closed shapes and, because it has a `done` key, is reported with
//! the completion diagnostic (unrecognized `tool`/`args` keys).

use crate::schemas::{ParsedResponse, ShapeKind};
use crate::validation::ValidationError;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

/// Shapes tried by [`validate_response`], in precedence order
pub const CANDIDATES: [ShapeKind; 2] = [ShapeKind::Completion, ShapeKind::ToolCall];

/// Key whose presence marks a value as an attempted completion
const COMPLETION_MARKER: &str = "done";

/// Outcome of classifying a decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Value matched one shape exactly
    Matched(ParsedResponse),

    /// Value matched neither shape
    Unmatched {
        /// `Field "<path>": ...` lines, then the received-keys summary
        errors: Vec<String>,
        /// Issues of the shape selected by [`diagnostic_shape`]
        diagnostic: ValidationError,
    },
}

impl Classification {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn value(&self) -> Option<&ParsedResponse> {
        match self {
            Self::Matched(value) => Some(value),
            Self::Unmatched { .. } => None,
        }
    }

    /// Error lines; empty for a match
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Matched(_) => &[],
            Self::Unmatched { errors, .. } => errors,
        }
    }

    pub fn diagnostic(&self) -> Option<&ValidationError> {
        match self {
            Self::Matched(_) => None,
            Self::Unmatched { diagnostic, .. } => Some(diagnostic),
        }
    }

    pub fn into_result(self) -> Result<ParsedResponse, (Vec<String>, ValidationError)> {
        match self {
            Self::Matched(value) => Ok(value),
            Self::Unmatched { errors, diagnostic } => Err((errors, diagnostic)),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Matched(value) => {
                let mut state = serializer.serialize_struct("Classification", 2)?;
                state.serialize_field("matched", &true)?;
                state.serialize_field("value", value)?;
                state.end()
            }
            Self::Unmatched { errors, diagnostic } => {
                let mut state = serializer.serialize_struct("Classification", 3)?;
                state.serialize_field("matched", &false)?;
                state.serialize_field("errors", errors)?;
                state.serialize_field("diagnostic", diagnostic)?;
                state.end()
            }
        }
    }
}

/// Classify a decoded value as a tool call or a completion
///
/// Never panics; every failure is represented in the returned value.
///
/// ```rust
/// use response_parser::validate_response;
/// use serde_json::json;
///
/// let result = validate_response(&json!({"done": false, "response": "Not done yet"}));
/// assert!(!result.is_matched());
/// assert!(result.errors().iter().any(|e| e.contains("\"done\"")));
/// ```
pub fn validate_response(value: &Value) -> Classification {
    let [first, second] = CANDIDATES;

    let first_failure = match first.parse(value) {
        Ok(parsed) => return matched(first, parsed),
        Err(err) => err,
    };
    let second_failure = match second.parse(value) {
        Ok(parsed) => return matched(second, parsed),
        Err(err) => err,
    };

    let reported = diagnostic_shape(value);
    let diagnostic = if reported == first {
        first_failure
    } else {
        second_failure
    };

    let errors = build_errors(&diagnostic, value);
    debug!(
        shape = %reported,
        issues = diagnostic.issues().len(),
        "Response matched no shape"
    );

    Classification::Unmatched { errors, diagnostic }
}

fn matched(kind: ShapeKind, parsed: ParsedResponse) -> Classification {
    debug!(shape = %kind, "Response matched");
    Classification::Matched(parsed)
}

/// Tie-break: which failed shape's issues to report
///
/// A JSON object with a `done` key was evidently meant as a completion;
/// everything else is reported against the tool-call shape.
pub fn diagnostic_shape(value: &Value) -> ShapeKind {
    match value {
        Value::Object(map) if map.contains_key(COMPLETION_MARKER) => ShapeKind::Completion,
        _ => ShapeKind::ToolCall,
    }
}

fn build_errors(diagnostic: &ValidationError, value: &Value) -> Vec<String> {
    let mut errors = diagnostic.field_messages();

    if let Value::Object(map) = value {
        if !map.is_empty() {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            errors.push(format!("Received object with keys: {}", keys.join(", ")));
        }
    }

    errors
}
