//! Message Router (persistence side)
//!
//! `send_message` validates and persists; delivery to live connections is
//! done by the caller through `realtime::fanout`. `history` returns the full
//! ordered log of a chat.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::users::user_exists;
use crate::backend::chat::{db, directory};
use crate::backend::error::ChatError;
use crate::shared::messaging::{validate_content, Chat, ChatId, ChatMessage, UserId};

/// A persisted message together with the chat it was sent in
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat: Chat,
    pub message: ChatMessage,
}

/// Persist a new message
///
/// Nothing is written unless every check passes.
///
/// # Errors
///
/// * `ChatNotFound` - No such chat
/// * `SenderNotFound` - No such user
/// * `SenderNotParticipant` - The sender is not one of the chat's participants
/// * `InvalidContent` - Blank or longer than `max_chars`
pub async fn send_message(
    pool: &SqlitePool,
    chat_id: ChatId,
    sender_id: UserId,
    content: &str,
    max_chars: usize,
) -> Result<SentMessage, ChatError> {
    let chat = directory::find_chat(pool, chat_id).await?;

    if !user_exists(pool, sender_id).await? {
        return Err(ChatError::SenderNotFound(sender_id));
    }
    if !chat.has_participant(sender_id) {
        return Err(ChatError::SenderNotParticipant { chat_id, sender_id });
    }
    validate_content(content, max_chars)?;

    let message =
        db::insert_message(pool, chat_id, sender_id, content, Utc::now().timestamp_millis()).await?;
    tracing::debug!("Stored message {} in chat {}", message.id, chat_id);

    Ok(SentMessage { chat, message })
}

/// All messages of a chat, ascending by `sent_at`
pub async fn history(pool: &SqlitePool, chat_id: ChatId) -> Result<Vec<ChatMessage>, ChatError> {
    let chat = directory::find_chat(pool, chat_id).await?;
    Ok(db::load_history(pool, chat.id).await?)
}

/// Number of messages in a chat
pub async fn message_count(pool: &SqlitePool, chat_id: ChatId) -> Result<i64, ChatError> {
    let chat = directory::find_chat(pool, chat_id).await?;
    Ok(db::count_messages(pool, chat.id).await?)
}

/// Most recent message of a chat, if any
pub async fn last_message(
    pool: &SqlitePool,
    chat_id: ChatId,
) -> Result<Option<ChatMessage>, ChatError> {
    let chat = directory::find_chat(pool, chat_id).await?;
    Ok(db::last_message(pool, chat.id).await?)
}
