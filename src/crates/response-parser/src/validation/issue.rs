//! Validation issues and the aggregated error

use super::path::{path_to_string, PathSegment};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Type name of a (possibly missing) JSON value, as reported in issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// Field not present
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Classify a value; `None` is a missing field
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => Self::Undefined,
            Some(Value::Null) => Self::Null,
            Some(Value::Bool(_)) => Self::Boolean,
            Some(Value::Number(_)) => Self::Number,
            Some(Value::String(_)) => Self::String,
            Some(Value::Array(_)) => Self::Array,
            Some(Value::Object(_)) => Self::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong at a given path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
    /// Value has the wrong JSON type (or is missing)
    InvalidType { expected: JsonType, received: JsonType },

    /// Value differs from the single permitted literal
    InvalidLiteral { expected: Value },

    /// Object carries keys the shape does not declare
    UnrecognizedKeys { keys: Vec<String> },

    /// String shorter than the declared minimum
    TooSmall { minimum: usize },
}

impl IssueKind {
    /// Human-readable description without the field prefix
    pub fn message(&self) -> String {
        match self {
            Self::InvalidType { expected, received } => {
                format!("Expected {} but received {}", expected, received)
            }
            Self::InvalidLiteral { expected } => {
                format!("Invalid literal value, expected {}", expected)
            }
            Self::UnrecognizedKeys { keys } => {
                let quoted: Vec<String> = keys.iter().map(|k| format!("'{}'", k)).collect();
                format!("Unrecognized key(s) in object: {}", quoted.join(", "))
            }
            Self::TooSmall { minimum } => {
                format!("String must contain at least {} character(s)", minimum)
            }
        }
    }
}

/// A single field-level violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub path: Vec<PathSegment>,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn new(path: Vec<PathSegment>, kind: IssueKind) -> Self {
        Self { path, kind }
    }

    /// Issue on the value itself rather than a field
    pub fn root(kind: IssueKind) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Issue on a top-level field
    pub fn field(key: &str, kind: IssueKind) -> Self {
        Self::new(vec![PathSegment::from(key)], kind)
    }

    /// Dotted path, `root` for the value itself
    pub fn path_string(&self) -> String {
        path_to_string(&self.path)
    }

    /// `Field "<path>": <description>`
    pub fn field_message(&self) -> String {
        format!("Field \"{}\": {}", self.path_string(), self.kind.message())
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field_message())
    }
}

/// All issues found while checking a value against one shape
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("value does not match {shape} shape ({} issue(s))", .issues.len())]
pub struct ValidationError {
    shape: String,
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(shape: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            shape: shape.into(),
            issues,
        }
    }

    /// Name of the shape the value was checked against
    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// One `Field "<path>": ...` line per issue
    pub fn field_messages(&self) -> Vec<String> {
        self.issues.iter().map(ValidationIssue::field_message).collect()
    }

    /// Whether any issue concerns the given top-level key
    pub fn mentions_field(&self, key: &str) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue.path.first(), Some(PathSegment::Key(k)) if k == key))
    }
}
