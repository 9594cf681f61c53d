use crate::domain::{self, Email, UserId, user::User};
use crate::ports::{SessionToken, UserWrite};
use chrono::Utc;

use super::dependencies::ServiceDependencies;
use super::errors::{Result, ServiceError};

/// サインイン結果
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: SessionToken,
}

/// 利用者を新規登録する
///
/// ビジネスルール：
/// - メールアドレスは形式が正しく、未登録であること
/// - パスワードは空でないこと
/// - 新規登録者は管理者ではない
///
/// パスワードはハッシュ化して保存し、ログにも戻り値にも含めない。
pub async fn sign_up(
    deps: &ServiceDependencies,
    email: &str,
    password: &str,
    username: &str,
) -> Result<User> {
    let email = Email::parse(email)?;
    if password.is_empty() {
        return Err(domain::ValidationError::EmptyField("password").into());
    }

    let user = domain::user::register_user(email, username, Utc::now())?;

    let password_hash = deps
        .password_hasher
        .hash(password)
        .map_err(ServiceError::PasswordHash)?;

    match deps
        .users
        .insert(user.clone(), password_hash)
        .await
        .map_err(ServiceError::Repository)?
    {
        UserWrite::Written => {
            tracing::info!(user_id = %user.user_id, "user signed up");
            Ok(user)
        }
        UserWrite::EmailTaken | UserWrite::Missing => Err(ServiceError::DuplicateEmail),
    }
}

/// サインインしてセッションを開始する
///
/// メールアドレス不明とパスワード不一致は区別せず `InvalidCredentials` を返す。
pub async fn sign_in(deps: &ServiceDependencies, email: &str, password: &str) -> Result<SignedIn> {
    let email = Email::parse(email).map_err(|_| ServiceError::InvalidCredentials)?;

    let credentials = deps
        .users
        .credentials(&email)
        .await
        .map_err(ServiceError::Repository)?
        .ok_or(ServiceError::InvalidCredentials)?;

    let matches = deps
        .password_hasher
        .verify(password, &credentials.password_hash)
        .map_err(ServiceError::PasswordHash)?;

    if !matches {
        tracing::warn!(user_id = %credentials.user.user_id, "sign-in rejected");
        return Err(ServiceError::InvalidCredentials);
    }

    let token = deps
        .sessions
        .create(credentials.user.user_id)
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!(user_id = %credentials.user.user_id, "user signed in");

    Ok(SignedIn {
        user: credentials.user,
        token,
    })
}

/// セッションを終了する（未知のトークンでも成功扱い）
pub async fn sign_out(deps: &ServiceDependencies, token: &SessionToken) -> Result<()> {
    let revoked = deps
        .sessions
        .revoke(token)
        .await
        .map_err(ServiceError::Repository)?;

    tracing::debug!(revoked, "sign-out");
    Ok(())
}

/// セッションの利用者を取得する
///
/// トークンが無効、または利用者が削除済みなら None。
pub async fn get_current_user(
    deps: &ServiceDependencies,
    token: &SessionToken,
) -> Result<Option<User>> {
    let Some(user_id) = deps
        .sessions
        .resolve(token)
        .await
        .map_err(ServiceError::Repository)?
    else {
        return Ok(None);
    };

    deps.users
        .get(user_id)
        .await
        .map_err(ServiceError::Repository)
}

/// 管理者か確認する（未知の利用者は false）
pub async fn check_admin_status(deps: &ServiceDependencies, user_id: UserId) -> Result<bool> {
    let user = deps
        .users
        .get(user_id)
        .await
        .map_err(ServiceError::Repository)?;

    Ok(user.is_some_and(|u| u.is_admin))
}

/// 管理者専用操作の認可
pub async fn require_admin(deps: &ServiceDependencies, actor: UserId) -> Result<()> {
    if check_admin_status(deps, actor).await? {
        return Ok(());
    }

    tracing::warn!(actor = %actor, "admin-only operation rejected");
    Err(ServiceError::Unauthorized)
}

/// 本人または管理者のみ許可する
pub async fn require_self_or_admin(
    deps: &ServiceDependencies,
    actor: UserId,
    owner: UserId,
) -> Result<()> {
    if actor == owner {
        return Ok(());
    }
    require_admin(deps, actor).await
}
