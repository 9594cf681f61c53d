use crate::domain::{UserId, chat::ChatMessage, chat::is_between};
use crate::ports::chat_repository::{ChatRepository as ChatRepositoryTrait, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// ChatRepositoryのインメモリ実装（追記専用ログ）
#[derive(Default)]
pub struct ChatRepository {
    messages: RwLock<Vec<ChatMessage>>,
}

impl ChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find<F>(&self, predicate: F) -> Vec<ChatMessage>
    where
        F: Fn(&ChatMessage) -> bool,
    {
        let messages = self.messages.read().await;
        messages.iter().filter(|m| predicate(*m)).cloned().collect()
    }
}

#[async_trait]
impl ChatRepositoryTrait for ChatRepository {
    async fn insert(&self, message: ChatMessage) -> Result<()> {
        self.messages.write().await.push(message);
        Ok(())
    }

    async fn find_sent(&self, sender_id: UserId) -> Result<Vec<ChatMessage>> {
        Ok(self.find(|m| m.sender_id == sender_id).await)
    }

    async fn find_received(&self, receiver_id: UserId) -> Result<Vec<ChatMessage>> {
        Ok(self.find(|m| m.receiver_id == receiver_id).await)
    }

    async fn find_conversation(&self, a: UserId, b: UserId) -> Result<Vec<ChatMessage>> {
        Ok(self.find(|m| is_between(m, a, b)).await)
    }
}
