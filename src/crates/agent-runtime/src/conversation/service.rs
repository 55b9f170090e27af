//! History operations bound to a single conversation

use super::error::{ConversationError, Result};
use super::repository::{Conversation, ConversationRepository};
use crate::messages::Message;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Characters per token for the rough size estimate
pub const CHARS_PER_TOKEN: usize = 4;

/// History of one conversation
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Id this service operates on
    fn conversation_id(&self) -> &str;

    /// Create the (empty) conversation
    async fn create(&self) -> Result<Conversation>;

    async fn append(&self, message: Message) -> Result<()>;

    /// All messages, oldest first
    async fn get_all(&self) -> Result<Vec<Message>>;

    /// Drop every message; the conversation itself remains
    async fn clear(&self) -> Result<()>;

    /// Total content characters divided by [`CHARS_PER_TOKEN`], rounded up
    async fn estimate_token_count(&self) -> Result<usize>;
}

/// [`ConversationService`] over a shared repository
pub struct InMemoryConversationService {
    conversation_id: String,
    repository: Arc<dyn ConversationRepository>,
}

impl InMemoryConversationService {
    pub fn new(conversation_id: impl Into<String>, repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            repository,
        }
    }

    /// Service for a fresh random (v4 UUID) conversation id
    pub fn with_generated_id(repository: Arc<dyn ConversationRepository>) -> Self {
        Self::new(Uuid::new_v4().to_string(), repository)
    }

    async fn load(&self) -> Result<Conversation> {
        self.repository
            .get(&self.conversation_id)
            .await
            .ok_or_else(|| ConversationError::NotFound(self.conversation_id.clone()))
    }
}

#[async_trait]
impl ConversationService for InMemoryConversationService {
    fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    async fn create(&self) -> Result<Conversation> {
        let conversation = Conversation::new(self.conversation_id.clone());
        self.repository.create(conversation.clone()).await?;
        debug!(conversation_id = %self.conversation_id, "Created conversation");
        Ok(conversation)
    }

    async fn append(&self, message: Message) -> Result<()> {
        debug!(
            conversation_id = %self.conversation_id,
            role = %message.role,
            "Appending message"
        );
        self.repository.append(&self.conversation_id, message).await
    }

    async fn get_all(&self) -> Result<Vec<Message>> {
        Ok(self.load().await?.messages)
    }

    async fn clear(&self) -> Result<()> {
        self.repository
            .replace(&self.conversation_id, Vec::new())
            .await
    }

    async fn estimate_token_count(&self) -> Result<usize> {
        let total_chars: usize = self.get_all().await?.iter().map(Message::char_count).sum();
        Ok(total_chars.div_ceil(CHARS_PER_TOKEN))
    }
}
