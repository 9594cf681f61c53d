use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, UserId, ValidationError};

/// User集約
///
/// パスワードは保持しない（資格情報はUserRepositoryが別に管理する）。
/// bookings / reviews などの関連は保持せず、各ストアへの問い合わせで導出する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: Email,
    pub is_admin: bool,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// プロフィール更新の内容
///
/// user_id と is_admin は型として含まれないため、更新で変更できない。
/// None の項目は現在の値を維持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Some(None) で画像を削除する
    #[serde(default, with = "super::double_option")]
    pub profile_image: Option<Option<String>>,
}

/// 純粋関数：利用者を登録する
///
/// ビジネスルール：
/// - 利用者名は空でないこと
/// - 新規登録者は管理者ではない
pub fn register_user(
    email: Email,
    username: &str,
    registered_at: DateTime<Utc>,
) -> Result<User, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::EmptyField("username"));
    }

    Ok(User {
        user_id: UserId::new(),
        username: username.to_string(),
        email,
        is_admin: false,
        profile_image: None,
        created_at: registered_at,
        updated_at: registered_at,
    })
}

/// 純粋関数：プロフィール更新を適用する
///
/// 部分更新。バリデーションに失敗した場合は元の値を変更しない。
pub fn apply_profile_update(
    user: &User,
    update: ProfileUpdate,
    updated_at: DateTime<Utc>,
) -> Result<User, ValidationError> {
    let username = match update.username {
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyField("username"));
            }
            name.to_string()
        }
        None => user.username.clone(),
    };

    let email = match update.email {
        Some(raw) => Email::parse(&raw)?,
        None => user.email.clone(),
    };

    let profile_image = match update.profile_image {
        Some(image) => image.filter(|s| !s.trim().is_empty()),
        None => user.profile_image.clone(),
    };

    Ok(User {
        username,
        email,
        profile_image,
        updated_at,
        ..user.clone()
    })
}
