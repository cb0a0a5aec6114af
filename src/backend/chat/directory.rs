//! Chat Directory
//!
//! Resolves the chat for an unordered pair of users, creating it on first
//! use. `(a, b)` and `(b, a)` always yield the same chat; the returned chat
//! exposes its participants in stored (canonical) order, not argument order.

use sqlx::SqlitePool;

use crate::backend::auth::users::user_exists;
use crate::backend::chat::db;
use crate::backend::error::ChatError;
use crate::shared::messaging::{Chat, ChatId, UserId};

/// Get or create the chat between two users
///
/// # Errors
///
/// * `ParticipantNotFound` - Either user does not exist
pub async fn get_or_create_chat(pool: &SqlitePool, a: UserId, b: UserId) -> Result<Chat, ChatError> {
    for user_id in [a, b] {
        if !user_exists(pool, user_id).await? {
            return Err(ChatError::ParticipantNotFound(user_id));
        }
    }

    let (chat, created) = db::insert_chat_if_absent(pool, a, b).await?;
    if created {
        tracing::info!(
            "Created chat {} between {} and {}",
            chat.id,
            chat.user_a_id,
            chat.user_b_id
        );
    }
    Ok(chat)
}

/// All chats where the user appears as either participant
pub async fn find_all_for_participant(
    pool: &SqlitePool,
    user_id: UserId,
) -> Result<Vec<Chat>, ChatError> {
    if !user_exists(pool, user_id).await? {
        return Err(ChatError::ParticipantNotFound(user_id));
    }
    Ok(db::find_chats_for_user(pool, user_id).await?)
}

/// Load a chat or fail with `ChatNotFound`
pub async fn find_chat(pool: &SqlitePool, chat_id: ChatId) -> Result<Chat, ChatError> {
    db::find_chat_by_id(pool, chat_id)
        .await?
        .ok_or(ChatError::ChatNotFound(chat_id))
}

/// Load a chat the user belongs to
///
/// # Errors
///
/// * `ChatNotFound` - No such chat
/// * `NotParticipant` - The user is not one of its participants
pub async fn find_chat_for_member(
    pool: &SqlitePool,
    chat_id: ChatId,
    user_id: UserId,
) -> Result<Chat, ChatError> {
    let chat = find_chat(pool, chat_id).await?;
    if !chat.has_participant(user_id) {
        return Err(ChatError::NotParticipant { chat_id, user_id });
    }
    Ok(chat)
}
