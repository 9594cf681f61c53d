use crate::domain::UserId;
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// セッショントークン（不透明な文字列）
///
/// Debug出力ではトークン本体を表示しない。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn from_string(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// セッションストアポート
///
/// サインイン中の呼び出し元を識別する。
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 新しいセッションを開始する
    async fn create(&self, user_id: UserId) -> Result<SessionToken>;

    /// トークンから利用者を解決する
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>>;

    /// セッションを破棄する。存在しなかった場合は false。
    async fn revoke(&self, token: &SessionToken) -> Result<bool>;

    /// 利用者の全セッションを破棄し、破棄した件数を返す
    async fn revoke_all(&self, user_id: UserId) -> Result<usize>;

    /// 全セッションを破棄する（シャットダウン時）
    async fn clear(&self) -> Result<()>;
}
