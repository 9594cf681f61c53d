use crate::application::chat_service;
use crate::domain::{UserId, commands::SendMessage};
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
    types::{MessageResponse, SendMessageRequest, to_responses},
};

/// POST /messages - メッセージを送信（送信者は呼び出し元）
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let cmd = SendMessage {
        sender_id: caller.user_id,
        receiver_id: UserId::from_uuid(req.receiver_id),
        text: req.text,
    };

    let message = chat_service::send_message(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// GET /messages/inbox - 受信メッセージ（新しい順）
pub async fn inbox(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let messages = chat_service::get_inbox(&state.service_deps, caller.user_id).await?;
    Ok(Json(to_responses(messages)))
}

/// GET /messages/sent - 送信メッセージ（新しい順）
pub async fn sent(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let messages = chat_service::get_sent(&state.service_deps, caller.user_id).await?;
    Ok(Json(to_responses(messages)))
}

/// GET /messages/with/:user_id - 相手との会話（古い順）
pub async fn conversation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiPath(other): ApiPath<Uuid>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let messages = chat_service::get_conversation(
        &state.service_deps,
        caller.user_id,
        UserId::from_uuid(other),
    )
    .await?;
    Ok(Json(to_responses(messages)))
}
