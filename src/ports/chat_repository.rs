use crate::domain::{UserId, chat::ChatMessage};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// メッセージリポジトリポート
///
/// 追記のみ。検索結果は送信順（古い順）で返す。
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn insert(&self, message: ChatMessage) -> Result<()>;

    /// 送信済みメッセージ
    async fn find_sent(&self, sender_id: UserId) -> Result<Vec<ChatMessage>>;

    /// 受信メッセージ
    async fn find_received(&self, receiver_id: UserId) -> Result<Vec<ChatMessage>>;

    /// 2者間の会話
    async fn find_conversation(&self, a: UserId, b: UserId) -> Result<Vec<ChatMessage>>;
}
