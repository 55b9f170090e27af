//! Tool registry errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// A tool with this name is already registered
    #[error("Tool '{0}' is already registered")]
    AlreadyRegistered(String),

    /// No tool with this name
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Arguments rejected by the tool
    #[error("Invalid tool arguments for {tool}: {}", .errors.join("; "))]
    InvalidArguments { tool: String, errors: Vec<String> },
}
