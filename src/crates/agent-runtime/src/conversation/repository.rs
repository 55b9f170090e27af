//! Conversation storage

use super::error::{ConversationError, Result};
use crate::messages::Message;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ordered message history under one id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Empty conversation created now
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Storage backend for conversations
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Snapshot of a conversation, if it exists
    async fn get(&self, id: &str) -> Option<Conversation>;

    /// Store a new conversation; fails if the id is taken
    async fn create(&self, conversation: Conversation) -> Result<()>;

    /// Append one message
    async fn append(&self, id: &str, message: Message) -> Result<()>;

    /// Replace the whole message list
    async fn replace(&self, id: &str, messages: Vec<Message>) -> Result<()>;
}

/// Process-local repository backed by a `HashMap`
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn get(&self, id: &str) -> Option<Conversation> {
        self.conversations.read().await.get(id).cloned()
    }

    async fn create(&self, conversation: Conversation) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        if conversations.contains_key(&conversation.id) {
            return Err(ConversationError::AlreadyExists(conversation.id));
        }
        conversations.insert(conversation.id.clone(), conversation);
        Ok(())
    }

    async fn append(&self, id: &str, message: Message) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| ConversationError::NotFound(id.to_string()))?;
        conversation.messages.push(message);
        conversation.touch();
        Ok(())
    }

    async fn replace(&self, id: &str, messages: Vec<Message>) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| ConversationError::NotFound(id.to_string()))?;
        conversation.messages = messages;
        conversation.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryConversationRepository::new();
        repo.create(Conversation::new("c-1")).await.unwrap();

        let conversation = repo.get("c-1").await.unwrap();
        assert_eq!(conversation.id, "c-1");
        assert!(conversation.messages.is_empty());
        assert_eq!(conversation.created_at, conversation.updated_at);
        assert!(repo.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create() {
        let repo = InMemoryConversationRepository::new();
        repo.create(Conversation::new("c-1")).await.unwrap();

        let err = repo.create(Conversation::new("c-1")).await.unwrap_err();
        assert_eq!(err, ConversationError::AlreadyExists("c-1".into()));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let repo = InMemoryConversationRepository::new();
        repo.create(Conversation::new("c-1")).await.unwrap();
        repo.append("c-1", Message::user("first")).await.unwrap();
        repo.append("c-1", Message::assistant("second")).await.unwrap();

        let conversation = repo.get("c-1").await.unwrap();
        assert_eq!(
            conversation.messages,
            vec![Message::user("first"), Message::assistant("second")]
        );
        assert!(conversation.updated_at >= conversation.created_at);
    }

    #[tokio::test]
    async fn test_missing_conversation() {
        let repo = InMemoryConversationRepository::new();

        let err = repo.append("nope", Message::user("x")).await.unwrap_err();
        assert_eq!(err, ConversationError::NotFound("nope".into()));
        assert!(repo.replace("nope", Vec::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryConversationRepository::new();
        let other = repo.clone();
        repo.create(Conversation::new("shared")).await.unwrap();

        assert!(other.get("shared").await.is_some());
        assert!(!other.is_empty().await);
    }
}
