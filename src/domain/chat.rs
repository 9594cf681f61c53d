use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MessageId, UserId, ValidationError, commands::SendMessage};

/// 利用者間のメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// 純粋関数：メッセージを作成する
///
/// ビジネスルール：
/// - 送信者と受信者は異なる
/// - 本文は空白のみ不可
pub fn compose_message(
    cmd: &SendMessage,
    sent_at: DateTime<Utc>,
) -> Result<ChatMessage, ValidationError> {
    if cmd.sender_id == cmd.receiver_id {
        return Err(ValidationError::SelfMessage);
    }
    if cmd.text.trim().is_empty() {
        return Err(ValidationError::EmptyField("text"));
    }

    Ok(ChatMessage {
        message_id: MessageId::new(),
        sender_id: cmd.sender_id,
        receiver_id: cmd.receiver_id,
        text: cmd.text.clone(),
        timestamp: sent_at,
    })
}

/// 2者間の会話に属するか
pub fn is_between(message: &ChatMessage, a: UserId, b: UserId) -> bool {
    (message.sender_id == a && message.receiver_id == b)
        || (message.sender_id == b && message.receiver_id == a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_message() {
        let cmd = SendMessage {
            sender_id: UserId::new(),
            receiver_id: UserId::new(),
            text: "Is breakfast included?".to_string(),
        };
        let message = compose_message(&cmd, Utc::now()).unwrap();

        assert_eq!(message.sender_id, cmd.sender_id);
        assert_eq!(message.receiver_id, cmd.receiver_id);
        assert!(is_between(&message, cmd.receiver_id, cmd.sender_id));
        assert!(!is_between(&message, cmd.sender_id, UserId::new()));
    }

    #[test]
    fn test_compose_message_rejects_self_message() {
        let user = UserId::new();
        let cmd = SendMessage {
            sender_id: user,
            receiver_id: user,
            text: "hello".to_string(),
        };
        assert_eq!(
            compose_message(&cmd, Utc::now()).unwrap_err(),
            ValidationError::SelfMessage
        );
    }

    #[test]
    fn test_compose_message_rejects_blank_text() {
        let cmd = SendMessage {
            sender_id: UserId::new(),
            receiver_id: UserId::new(),
            text: "   ".to_string(),
        };
        assert_eq!(
            compose_message(&cmd, Utc::now()).unwrap_err(),
            ValidationError::EmptyField("text")
        );
    }
}
