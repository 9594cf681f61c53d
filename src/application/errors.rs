use crate::domain::{BookingTransitionError, ValidationError};
use thiserror::Error;

/// アプリケーション層のエラー
///
/// 失敗した操作は何も変更しない（部分的な書き込みは観測されない）。
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 参照したIDが存在しない
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// 値が許容範囲外（負の料金、範囲外の評価、チェックアウト ≤ チェックインなど）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// サインアップ時のメールアドレス重複
    #[error("Email is already registered")]
    DuplicateEmail,

    /// サインイン失敗（メールアドレス不明またはパスワード不一致）
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 不正な状態遷移（二重キャンセルなど）
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 管理者専用操作・他人のリソースへの操作
    #[error("Caller is not authorized for this operation")]
    Unauthorized,

    /// 依存レコードがあるため削除できない
    #[error("Conflict: {0}")]
    Conflict(String),

    /// リポジトリ（ストレージ）のエラー
    #[error("Repository error")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// パスワードハッシュのエラー
    #[error("Password hasher error")]
    PasswordHash(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidArgument(err.to_string())
    }
}

impl From<BookingTransitionError> for ServiceError {
    fn from(err: BookingTransitionError) -> Self {
        ServiceError::InvalidState(err.to_string())
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ServiceError>;
