use crate::application::{
    ServiceError, auth_gateway::require_self_or_admin, booking_manager, review_manager, user_store,
};
use crate::domain::{UserId, user::ProfileUpdate};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{AppState, authenticate};
use crate::api::{
    error::ApiError,
    extract::{ApiJson, ApiPath},
    types::{BookingResponse, ReviewResponse, UserResponse, to_responses},
};

/// GET /users - 全利用者（管理者専用）
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let users = user_store::get_all_users(&state.service_deps, caller.user_id).await?;
    Ok(Json(to_responses(users)))
}

/// GET /users/:id - 利用者詳細（本人または管理者）
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let user_id = UserId::from_uuid(user_id);

    require_self_or_admin(&state.service_deps, caller.user_id, user_id).await?;

    let user = user_store::get_user_details(&state.service_deps, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("user", user_id))?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/:id - プロフィール更新（本人または管理者）
///
/// is_admin・user_id を含むリクエストはボディの検証で拒否される。
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<UserResponse>, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let user_id = UserId::from_uuid(user_id);

    require_self_or_admin(&state.service_deps, caller.user_id, user_id).await?;

    let user = user_store::update_user_profile(&state.service_deps, user_id, update).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/:id - 利用者を削除（管理者専用）
///
/// 有効な予約を持つ利用者は 409。
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    user_store::delete_user(
        &state.service_deps,
        caller.user_id,
        UserId::from_uuid(user_id),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/:id/bookings - 利用者の予約（本人または管理者、チェックイン日順）
pub async fn user_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let user_id = UserId::from_uuid(user_id);

    require_self_or_admin(&state.service_deps, caller.user_id, user_id).await?;

    let bookings = booking_manager::get_user_bookings(&state.service_deps, user_id).await?;
    Ok(Json(to_responses(bookings)))
}

/// GET /users/:id/reviews - 利用者のレビュー（新しい順）
pub async fn user_reviews(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews =
        review_manager::get_user_reviews(&state.service_deps, UserId::from_uuid(user_id)).await?;
    Ok(Json(to_responses(reviews)))
}
