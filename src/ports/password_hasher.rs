pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// パスワードハッシュポート
///
/// 平文のパスワードはこのポートの外に保存しない。
pub trait PasswordHasher: Send + Sync {
    /// 平文パスワードをハッシュ化する
    fn hash(&self, password: &str) -> Result<String>;

    /// 平文パスワードと保存済みハッシュを照合する
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}
