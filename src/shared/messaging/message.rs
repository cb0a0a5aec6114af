//! Chat Message Data Structure
//!
//! Represents a message in a chat. Messages are created on send and never
//! updated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatId, MessageId, UserId};
use crate::shared::error::SharedError;

/// Represents a persisted chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Surrogate message ID
    pub id: MessageId,
    /// Chat this message belongs to
    pub chat_id: ChatId,
    /// User who sent the message
    pub sender_id: UserId,
    /// Message text
    pub content: String,
    /// Persistence timestamp, strictly increasing within a chat
    pub sent_at: DateTime<Utc>,
}

/// Check message content before it is persisted.
pub fn validate_content(content: &str, max_chars: usize) -> Result<(), SharedError> {
    if content.trim().is_empty() {
        return Err(SharedError::validation(
            "content",
            "Message content cannot be empty",
        ));
    }
    let len = content.chars().count();
    if len > max_chars {
        return Err(SharedError::validation(
            "content",
            format!("Message content is {} characters, limit is {}", len, max_chars),
        ));
    }
    Ok(())
}

/// Body of `/app/chat.send`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
}

/// Body of `POST /api/chats/{id}/messages`; the sender is the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

/// Body of `/app/chat.history`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    #[serde(alias = "id")]
    pub chat_id: ChatId,
}

/// Response for `GET /api/chats/{id}/message-count`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageCountResponse {
    pub chat_id: ChatId,
    pub count: i64,
}
