pub mod auth;
pub mod bookings;
pub mod hotels;
pub mod messages;
pub mod users;

use crate::application::{ServiceDependencies, auth_gateway};
use crate::domain::user::User;
use crate::ports::SessionToken;
use axum::http::{HeaderMap, header::AUTHORIZATION};

use super::error::ApiError;

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Authentication
// ============================================================================

/// `Authorization: Bearer <token>` からトークンを取り出す
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(SessionToken::from_string(token))
}

/// 呼び出し元の利用者を特定する
///
/// トークンがない、失効している、または利用者が削除済みなら 401。
pub(crate) async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthenticated)?;

    auth_gateway::get_current_user(&state.service_deps, &token)
        .await?
        .ok_or(ApiError::Unauthenticated)
}
