//! Tools the agent can invoke
//!
//! A [`Tool`] is looked up by name in a [`ToolRegistry`] once the response
//! parser has produced a tool call. Argument checks use the same
//! [`ObjectShape`](response_parser::validation::ObjectShape) machinery as
//! response classification:
//!
//! ```rust
//! use agent_runtime::tools::{Tool, ToolResult};
//! use async_trait::async_trait;
//! use response_parser::validation::ObjectShape;
//! use serde_json::{json, Map, Value};
//! use std::sync::LazyLock;
//!
//! static ECHO_ARGS: LazyLock<ObjectShape> =
//!     LazyLock::new(|| ObjectShape::new("echo_args").string("text").strict());
//!
//! struct EchoTool;
//!
//! #[async_trait]
//! impl Tool for EchoTool {
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Return the text argument unchanged"
//!     }
//!
//!     fn validate_args(&self, args: &Map<String, Value>) -> Result<(), Vec<String>> {
//!         ECHO_ARGS
//!             .validate(&Value::Object(args.clone()))
//!             .map_err(|err| err.field_messages())
//!     }
//!
//!     async fn execute(&self, args: Map<String, Value>) -> ToolResult {
//!         ToolResult::ok(json!({"text": args["text"]}))
//!     }
//! }
//! ```

mod error;
mod registry;

pub use error::ToolError;
pub use registry::{InMemoryToolRegistry, ToolRegistry};

use async_trait::async_trait;
use response_parser::ToolCallResponse;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Callable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, matched against `tool` in model output
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON description of the accepted arguments, shown to the model
    fn parameters(&self) -> Value {
        json!({"type": "object"})
    }

    /// Check arguments before execution; `Err` carries one line per problem
    fn validate_args(&self, _args: &Map<String, Value>) -> Result<(), Vec<String>> {
        Ok(())
    }

    /// Run the tool; failures are reported in the result, not raised
    async fn execute(&self, args: Map<String, Value>) -> ToolResult;
}

/// Request to run a named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub args: Map<String, Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl From<ToolCallResponse> for ToolCall {
    fn from(response: ToolCallResponse) -> Self {
        Self::new(response.tool, response.args)
    }
}

/// Outcome of a tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Successful result carrying `data`
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed result with a message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        Self::failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_from_parsed_response() {
        let mut args = Map::new();
        args.insert("path".into(), json!("test.txt"));
        let call = ToolCall::from(ToolCallResponse::new("file_read", args.clone()));

        assert_eq!(call, ToolCall::new("file_read", args));
    }

    #[test]
    fn test_tool_result_serialization() {
        assert_eq!(
            serde_json::to_value(ToolResult::ok(json!({"lines": 3}))).unwrap(),
            json!({"success": true, "data": {"lines": 3}})
        );
        assert_eq!(
            serde_json::to_value(ToolResult::failure("boom")).unwrap(),
            json!({"success": false, "error": "boom"})
        );
    }

    #[test]
    fn test_tool_result_from_error() {
        let result = ToolResult::from(ToolError::NotFound("nope".into()));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Tool not found: nope"));
    }
}
