//! Context assembly for the next model call

use crate::messages::Message;
use thiserror::Error;

/// Context assembly errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// New user input is empty or whitespace only
    #[error("Input cannot be empty")]
    EmptyInput,
}

/// Append `input` as a user message to a copy of `history`
///
/// The input is kept verbatim, surrounding whitespace included.
///
/// ```rust
/// use agent_runtime::{build_context, Message};
///
/// let history = vec![Message::system("You are a coding assistant")];
/// let context = build_context("Read test.txt", &history).unwrap();
///
/// assert_eq!(context.len(), 2);
/// assert_eq!(history.len(), 1);
/// ```
pub fn build_context(input: &str, history: &[Message]) -> Result<Vec<Message>, ContextError> {
    if input.trim().is_empty() {
        return Err(ContextError::EmptyInput);
    }

    let mut context = Vec::with_capacity(history.len() + 1);
    context.extend_from_slice(history);
    context.push(Message::user(input));
    Ok(context)
}
