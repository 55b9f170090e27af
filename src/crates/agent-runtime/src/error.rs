//! Error types for the agent runtime

use crate::context::ContextError;
use crate::conversation::ConversationError;
use crate::tools::ToolError;
use thiserror::Error;

/// Errors that can occur while driving an agent turn
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Conversation store failure
    #[error(transparent)]
    Conversation(#[from] ConversationError),

    /// Tool registry failure
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Context assembly failure
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RuntimeError {
    /// Get the canonical error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Conversation(ConversationError::NotFound(_)) => "E_CONVERSATION_NOT_FOUND",
            Self::Conversation(ConversationError::AlreadyExists(_)) => "E_CONVERSATION_EXISTS",
            Self::Tool(ToolError::AlreadyRegistered(_)) => "E_TOOL_EXISTS",
            Self::Tool(ToolError::NotFound(_)) => "E_TOOL_NOT_FOUND",
            Self::Tool(ToolError::InvalidArguments { .. }) => "E_INVALID_ARGS",
            Self::Context(ContextError::EmptyInput) => "E_EMPTY_INPUT",
            Self::Serialization(_) => "E_SERIALIZATION",
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
