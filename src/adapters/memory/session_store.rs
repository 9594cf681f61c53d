use crate::domain::UserId;
use crate::ports::session_store::{Result, SessionStore as SessionStoreTrait, SessionToken};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// SessionStoreのインメモリ実装
///
/// プロセス再起動でセッションは失われる。
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionToken, UserId>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn create(&self, user_id: UserId) -> Result<SessionToken> {
        let token = SessionToken::generate();
        self.sessions.write().await.insert(token.clone(), user_id);
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>> {
        Ok(self.sessions.read().await.get(token).copied())
    }

    async fn revoke(&self, token: &SessionToken) -> Result<bool> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }

    async fn revoke_all(&self, user_id: UserId) -> Result<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, owner| *owner != user_id);
        Ok(before - sessions.len())
    }

    async fn clear(&self) -> Result<()> {
        self.sessions.write().await.clear();
        Ok(())
    }
}
