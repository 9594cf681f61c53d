use crate::domain::{Email, UserId, user::User};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書き込み結果
///
/// メールアドレスの一意性は書き込みと同じ原子操作の中で判定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserWrite {
    /// 書き込み完了
    Written,
    /// 他の利用者が同じメールアドレスを使用している
    EmailTaken,
    /// 更新対象が存在しない
    Missing,
}

/// 照合用の資格情報
#[derive(Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// 利用者リポジトリポート
///
/// User集約と、そのパスワードハッシュを所有する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 新しい利用者を登録する
    ///
    /// メールアドレスが既に使われていれば `UserWrite::EmailTaken` を返し、何も保存しない。
    async fn insert(&self, user: User, password_hash: String) -> Result<UserWrite>;

    /// 利用者を置き換える（パスワードハッシュは維持）
    async fn update(&self, user: User) -> Result<UserWrite>;

    async fn get(&self, user_id: UserId) -> Result<Option<User>>;

    /// サインイン照合用にメールアドレスで資格情報を取得する
    async fn credentials(&self, email: &Email) -> Result<Option<Credentials>>;

    async fn list(&self) -> Result<Vec<User>>;

    /// 削除する。存在しなかった場合は false。
    async fn delete(&self, user_id: UserId) -> Result<bool>;
}
