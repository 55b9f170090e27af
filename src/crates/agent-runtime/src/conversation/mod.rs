//! Conversation history
//!
//! [`ConversationRepository`] stores conversations by id;
//! [`ConversationService`] exposes the history operations for one id and
//! enforces the existence rules (`NotFound` for everything but `create`,
//! `AlreadyExists` on a second `create`).

mod error;
mod repository;
mod service;

pub use error::{ConversationError, Result};
pub use repository::{Conversation, ConversationRepository, InMemoryConversationRepository};
pub use service::{ConversationService, InMemoryConversationService, CHARS_PER_TOKEN};
