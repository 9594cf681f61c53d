use crate::domain::{
    self,
    UserId,
    user::{ProfileUpdate, User},
};
use crate::ports::UserWrite;
use chrono::Utc;

use super::auth_gateway::require_admin;
use super::dependencies::ServiceDependencies;
use super::errors::{Result, ServiceError};
use super::locks::LockKey;

/// 利用者の詳細を取得する
pub async fn get_user_details(deps: &ServiceDependencies, user_id: UserId) -> Result<Option<User>> {
    deps.users
        .get(user_id)
        .await
        .map_err(ServiceError::Repository)
}

/// プロフィールを更新する
///
/// user_id と is_admin は `ProfileUpdate` に含まれないため変更できない。
/// メールアドレスを変更する場合は他の利用者と重複しないこと（`DuplicateEmail`）。
pub async fn update_user_profile(
    deps: &ServiceDependencies,
    user_id: UserId,
    update: ProfileUpdate,
) -> Result<User> {
    let _guard = deps.locks.acquire(LockKey::User(user_id)).await;

    let user = get_user_details(deps, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("user", user_id))?;

    let updated = domain::user::apply_profile_update(&user, update, Utc::now())?;

    match deps
        .users
        .update(updated.clone())
        .await
        .map_err(ServiceError::Repository)?
    {
        UserWrite::Written => {
            tracing::info!(user_id = %user_id, "profile updated");
            Ok(updated)
        }
        UserWrite::EmailTaken => Err(ServiceError::DuplicateEmail),
        UserWrite::Missing => Err(ServiceError::not_found("user", user_id)),
    }
}

/// 全利用者を登録順で取得する（管理者専用）
pub async fn get_all_users(deps: &ServiceDependencies, actor: UserId) -> Result<Vec<User>> {
    require_admin(deps, actor).await?;

    let users = deps.users.list().await.map_err(ServiceError::Repository)?;
    tracing::debug!(count = users.len(), "listed users");
    Ok(users)
}

/// 利用者を削除する（管理者専用）
///
/// キャンセルされていない予約を持つ利用者は `Conflict` で拒否する。
/// 削除後も過去の予約・レビュー・メッセージは残し、セッションはすべて失効させる。
pub async fn delete_user(deps: &ServiceDependencies, actor: UserId, user_id: UserId) -> Result<()> {
    require_admin(deps, actor).await?;

    let _guard = deps.locks.acquire(LockKey::User(user_id)).await;

    if get_user_details(deps, user_id).await?.is_none() {
        return Err(ServiceError::not_found("user", user_id));
    }

    let active = deps
        .bookings
        .find_by_user(user_id)
        .await
        .map_err(ServiceError::Repository)?
        .iter()
        .filter(|b| b.status.is_active())
        .count();

    if active > 0 {
        tracing::warn!(user_id = %user_id, active, "user deletion blocked by bookings");
        return Err(ServiceError::Conflict(format!(
            "user {user_id} has {active} active booking(s)"
        )));
    }

    deps.users
        .delete(user_id)
        .await
        .map_err(ServiceError::Repository)?;

    let revoked = deps
        .sessions
        .revoke_all(user_id)
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!(user_id = %user_id, actor = %actor, revoked, "user deleted");
    Ok(())
}
