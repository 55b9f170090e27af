//! Response shapes
//!
//! Two closed shapes are recognized:
//!
//! - Tool call: `{ "tool": "file_read", "args": { "path": "test.ts" } }`
//! - Completion: `{ "done": true, "response": "Task completed successfully" }`

use crate::validation::{IssueKind, JsonType, ObjectShape, ValidationError, ValidationIssue};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::LazyLock;

static TOOL_CALL_SHAPE: LazyLock<ObjectShape> = LazyLock::new(|| {
    ObjectShape::new(ShapeKind::ToolCall.as_str())
        .non_empty_string("tool")
        .record("args")
        .strict()
});

static COMPLETION_SHAPE: LazyLock<ObjectShape> = LazyLock::new(|| {
    ObjectShape::new(ShapeKind::Completion.as_str())
        .literal("done", json!(true))
        .string("response")
        .strict()
});

/// Which of the two response shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    ToolCall,
    Completion,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToolCall => "tool_call",
            Self::Completion => "completion",
        }
    }

    /// The closed shape definition
    pub fn shape(&self) -> &'static ObjectShape {
        match self {
            Self::ToolCall => &*TOOL_CALL_SHAPE,
            Self::Completion => &*COMPLETION_SHAPE,
        }
    }

    /// Canonical example shown in remediation text
    pub fn example(&self) -> &'static str {
        match self {
            Self::ToolCall => r#"{"tool": "...", "args": {...}}"#,
            Self::Completion => r#"{"done": true, "response": "..."}"#,
        }
    }

    /// Validate `value` against this shape and build the typed response
    pub fn parse(&self, value: &Value) -> Result<ParsedResponse, ValidationError> {
        self.shape().validate(value)?;

        let parsed = match self {
            Self::ToolCall => ToolCallResponse::from_value(value).map(ParsedResponse::ToolCall),
            Self::Completion => {
                CompletionResponse::from_value(value).map(ParsedResponse::Completion)
            }
        };

        parsed.ok_or_else(|| {
            ValidationError::new(
                self.as_str(),
                vec![ValidationIssue::root(IssueKind::InvalidType {
                    expected: JsonType::Object,
                    received: JsonType::of(Some(value)),
                })],
            )
        })
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to invoke a named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCallResponse {
    /// Tool name (never empty)
    pub tool: String,
    /// Tool arguments, possibly empty
    pub args: Map<String, Value>,
}

impl ToolCallResponse {
    pub fn new(tool: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            tool: tool.into(),
            args,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let tool = value.get("tool")?.as_str()?;
        let args = value.get("args")?.as_object()?;
        Some(Self::new(tool, args.clone()))
    }
}

/// Signal that the task is finished
///
/// `done` is always `true`, so only the response text is stored. It is
/// serialized back as `{"done": true, "response": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub response: String,
}

impl CompletionResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// Always `true`
    pub fn done(&self) -> bool {
        true
    }

    fn from_value(value: &Value) -> Option<Self> {
        let response = value.get("response")?.as_str()?;
        Some(Self::new(response))
    }
}

impl Serialize for CompletionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompletionResponse", 2)?;
        state.serialize_field("done", &true)?;
        state.serialize_field("response", &self.response)?;
        state.end()
    }
}

/// A successfully classified model response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedResponse {
    ToolCall(ToolCallResponse),
    Completion(CompletionResponse),
}

impl ParsedResponse {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::ToolCall(_) => ShapeKind::ToolCall,
            Self::Completion(_) => ShapeKind::Completion,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCallResponse> {
        match self {
            Self::ToolCall(call) => Some(call),
            Self::Completion(_) => None,
        }
    }

    pub fn as_completion(&self) -> Option<&CompletionResponse> {
        match self {
            Self::Completion(done) => Some(done),
            Self::ToolCall(_) => None,
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion(_))
    }
}
