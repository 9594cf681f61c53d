use crate::domain::{self, UserId, chat::ChatMessage, commands::SendMessage};
use chrono::Utc;
use futures::future::try_join;

use super::dependencies::ServiceDependencies;
use super::errors::{Result, ServiceError};

/// メッセージを送信する
///
/// 送信者・受信者ともに存在すること（`NotFound`）。
pub async fn send_message(deps: &ServiceDependencies, cmd: SendMessage) -> Result<ChatMessage> {
    let (sender, receiver) = try_join(
        deps.users.get(cmd.sender_id),
        deps.users.get(cmd.receiver_id),
    )
    .await
    .map_err(ServiceError::Repository)?;

    if sender.is_none() {
        return Err(ServiceError::not_found("user", cmd.sender_id));
    }
    if receiver.is_none() {
        return Err(ServiceError::not_found("user", cmd.receiver_id));
    }

    let message = domain::chat::compose_message(&cmd, Utc::now())?;

    deps.messages
        .insert(message.clone())
        .await
        .map_err(ServiceError::Repository)?;

    tracing::info!(
        message_id = %message.message_id.value(),
        sender_id = %message.sender_id,
        receiver_id = %message.receiver_id,
        "message sent"
    );
    Ok(message)
}

/// 2者間の会話（古い順）
pub async fn get_conversation(
    deps: &ServiceDependencies,
    a: UserId,
    b: UserId,
) -> Result<Vec<ChatMessage>> {
    let mut messages = deps
        .messages
        .find_conversation(a, b)
        .await
        .map_err(ServiceError::Repository)?;
    messages.sort_by(|x, y| x.timestamp.cmp(&y.timestamp));
    Ok(messages)
}

/// 受信したメッセージ（新しい順）
pub async fn get_inbox(deps: &ServiceDependencies, user_id: UserId) -> Result<Vec<ChatMessage>> {
    let messages = deps
        .messages
        .find_received(user_id)
        .await
        .map_err(ServiceError::Repository)?;
    Ok(newest_first(messages))
}

/// 送信したメッセージ（新しい順）
pub async fn get_sent(deps: &ServiceDependencies, user_id: UserId) -> Result<Vec<ChatMessage>> {
    let messages = deps
        .messages
        .find_sent(user_id)
        .await
        .map_err(ServiceError::Repository)?;
    Ok(newest_first(messages))
}

fn newest_first(mut messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages.reverse();
    messages.sort_by(|x, y| y.timestamp.cmp(&x.timestamp));
    messages
}
