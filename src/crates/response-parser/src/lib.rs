//! Response interpretation for agent loops
//!
//! Turns raw, untrusted model output into one of two typed instructions:
//! a tool invocation or a completion signal.
//!
//! # Pipeline
//!
//! ```text
//! raw text ──► strip_markdown ──► parse_json ──► validate_response
//!                                     │                 │
//!                                     ▼                 ▼
//!                               DecodeError      Classification::Unmatched
//! ```
//!
//! Both failure paths are rendered by the [`format`] module into messages
//! that can be sent back to the model verbatim.
//!
//! # Modules
//!
//! - `fence` - Markdown code-fence removal
//! - `decode` - Strict JSON decoding with remediation text
//! - `schemas` - The tool-call and completion shapes
//! - `classify` - Ordered shape matching with the `done` tie-break
//! - `format` - Shared failure rendering
//! - `validation` - Closed-object shape validation and issue paths
//! - `config` - Parser configuration with environment loading
//! - `logging` - Log-safe previews of model output
//!
//! # Example
//!
//! ```rust
//! use response_parser::{interpret, ParsedResponse};
//!
//! let raw = "```json\n{\"tool\": \"file_read\", \"args\": {\"path\": \"test.txt\"}}\n```";
//! match interpret(raw).unwrap() {
//!     ParsedResponse::ToolCall(call) => assert_eq!(call.tool, "file_read"),
//!     ParsedResponse::Completion(_) => unreachable!(),
//! }
//! ```

pub mod classify;
pub mod config;
pub mod decode;
pub mod error;
pub mod fence;
pub mod format;
pub mod logging;
mod parser;
pub mod schemas;
pub mod validation;

pub use classify::{diagnostic_shape, validate_response, Classification, CANDIDATES};
pub use config::{ConfigBuilder, ParserConfig};
pub use decode::parse_json;
pub use error::{ConfigError, DecodeError, InterpretError, ValidationFailure};
pub use fence::strip_markdown;
pub use parser::{interpret, ResponseParser};
pub use schemas::{CompletionResponse, ParsedResponse, ShapeKind, ToolCallResponse};
pub use validation::{path_to_string, PathSegment, ValidationError, ValidationIssue};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
