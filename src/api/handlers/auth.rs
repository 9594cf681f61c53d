use crate::application::auth_gateway;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;

use super::{AppState, authenticate, bearer_token};
use crate::api::{
    error::ApiError,
    extract::ApiJson,
    types::{SignInRequest, SignInResponse, SignUpRequest, UserResponse},
};

/// POST /auth/sign-up - 利用者を新規登録
///
/// 新規登録者は管理者ではない。メールアドレスが登録済みなら 409。
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = auth_gateway::sign_up(
        &state.service_deps,
        &req.email,
        &req.password,
        &req.username,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /auth/sign-in - サインインしてトークンを発行
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    let signed_in = auth_gateway::sign_in(&state.service_deps, &req.email, &req.password).await?;

    Ok(Json(SignInResponse {
        token: signed_in.token.as_str().to_string(),
        user: UserResponse::from(signed_in.user),
    }))
}

/// POST /auth/sign-out - トークンを失効させる
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthenticated)?;
    auth_gateway::sign_out(&state.service_deps, &token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - 呼び出し元の利用者
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    Ok(Json(UserResponse::from(user)))
}
