//! Database operations for chats and messages
//!
//! Timestamps are stored as Unix milliseconds.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::shared::messaging::{canonical_pair, Chat, ChatId, ChatMessage, UserId};

/// Convert stored milliseconds back into a timestamp
pub(crate) fn timestamp_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

fn chat_from_row(row: &SqliteRow) -> Chat {
    Chat {
        id: row.get("id"),
        user_a_id: row.get("user_a_id"),
        user_b_id: row.get("user_b_id"),
        created_at: timestamp_from_millis(row.get("created_at")),
    }
}

fn message_from_row(row: &SqliteRow) -> ChatMessage {
    ChatMessage {
        id: row.get("id"),
        chat_id: row.get("chat_id"),
        sender_id: row.get("sender_id"),
        content: row.get("content"),
        sent_at: timestamp_from_millis(row.get("sent_at")),
    }
}

/// Insert the chat for a pair unless it exists, then return it.
///
/// The flag is true when this call created the row.
pub async fn insert_chat_if_absent(
    pool: &SqlitePool,
    a: UserId,
    b: UserId,
) -> Result<(Chat, bool), sqlx::Error> {
    let (low, high) = canonical_pair(a, b);

    let inserted = sqlx::query(
        r#"
        INSERT INTO chats (user_a_id, user_b_id, created_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (user_a_id, user_b_id) DO NOTHING
        "#,
    )
    .bind(low)
    .bind(high)
    .bind(Utc::now().timestamp_millis())
    .execute(pool)
    .await?
    .rows_affected()
        == 1;

    let row = sqlx::query(
        r#"
        SELECT id, user_a_id, user_b_id, created_at
        FROM chats
        WHERE user_a_id = ?1 AND user_b_id = ?2
        "#,
    )
    .bind(low)
    .bind(high)
    .fetch_one(pool)
    .await?;

    Ok((chat_from_row(&row), inserted))
}

/// Get a chat by ID
pub async fn find_chat_by_id(pool: &SqlitePool, id: ChatId) -> Result<Option<Chat>, sqlx::Error> {
    let row = sqlx::query("SELECT id, user_a_id, user_b_id, created_at FROM chats WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(chat_from_row))
}

/// All chats a user takes part in, oldest first
pub async fn find_chats_for_user(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Chat>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_a_id, user_b_id, created_at
        FROM chats
        WHERE user_a_id = ?1 OR user_b_id = ?1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(chat_from_row).collect())
}

/// Persist a message.
///
/// `sent_at` becomes `max(now_millis, last sent_at in this chat + 1)`,
/// computed in the same statement as the insert.
pub async fn insert_message(
    pool: &SqlitePool,
    chat_id: ChatId,
    sender_id: UserId,
    content: &str,
    now_millis: i64,
) -> Result<ChatMessage, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO messages (chat_id, sender_id, content, sent_at)
        SELECT ?1, ?2, ?3,
               MAX(?4, COALESCE((SELECT MAX(sent_at) FROM messages WHERE chat_id = ?1) + 1, 0))
        RETURNING id, chat_id, sender_id, content, sent_at
        "#,
    )
    .bind(chat_id)
    .bind(sender_id)
    .bind(content)
    .bind(now_millis)
    .fetch_one(pool)
    .await?;

    Ok(message_from_row(&row))
}

/// All messages of a chat, oldest first
pub async fn load_history(pool: &SqlitePool, chat_id: ChatId) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, chat_id, sender_id, content, sent_at
        FROM messages
        WHERE chat_id = ?1
        ORDER BY sent_at ASC, id ASC
        "#,
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(message_from_row).collect())
}

pub async fn count_messages(pool: &SqlitePool, chat_id: ChatId) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM messages WHERE chat_id = ?1")
        .bind(chat_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("total"))
}

/// Most recent message of a chat
pub async fn last_message(pool: &SqlitePool, chat_id: ChatId) -> Result<Option<ChatMessage>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, chat_id, sender_id, content, sent_at
        FROM messages
        WHERE chat_id = ?1
        ORDER BY sent_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(chat_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(message_from_row))
}
