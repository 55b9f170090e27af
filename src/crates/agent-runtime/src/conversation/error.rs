//! Conversation store errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    /// No conversation with this id
    #[error("Conversation {0} not found")]
    NotFound(String),

    /// A conversation with this id was already created
    #[error("Conversation {0} already exists")]
    AlreadyExists(String),
}

pub type Result<T> = std::result::Result<T, ConversationError>;
