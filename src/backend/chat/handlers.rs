/**
 * Chat REST Handlers
 *
 * # Routes
 *
 * - `POST /api/chats/get-or-create` - Resolve the chat for a pair of users
 * - `GET /api/chats?userId=` - Chats of a participant (default: the caller)
 * - `GET /api/chats/{id}/messages` - Ordered history
 * - `POST /api/chats/{id}/messages` - Send as the caller
 * - `GET /api/chats/{id}/message-count` - Number of messages
 * - `GET /api/chats/{id}/last-message` - Most recent message
 *
 * All routes require a principal. Everything under `/api/chats/{id}`
 * additionally requires the caller to be a participant of that chat.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::chat::{directory, messages};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::realtime::fanout::send_and_fan_out;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    ChatId, ChatMessage, ChatSummary, GetOrCreateChatRequest, ListChatsQuery,
    MessageCountResponse, PostMessageRequest,
};

/// POST /api/chats/get-or-create
pub async fn get_or_create(
    AuthUser(principal): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<GetOrCreateChatRequest>,
) -> Result<Json<ChatSummary>, BackendError> {
    tracing::debug!(
        "User {} resolving chat for ({}, {})",
        principal.user_id,
        request.user_a_id,
        request.user_b_id
    );
    let chat = directory::get_or_create_chat(&pool, request.user_a_id, request.user_b_id).await?;
    Ok(Json(chat.summary()))
}

/// GET /api/chats
pub async fn list_chats(
    AuthUser(principal): AuthUser,
    State(pool): State<SqlitePool>,
    Query(query): Query<ListChatsQuery>,
) -> Result<Json<Vec<ChatSummary>>, BackendError> {
    let user_id = query.user_id.unwrap_or(principal.user_id);
    let chats = directory::find_all_for_participant(&pool, user_id).await?;
    Ok(Json(chats.iter().map(|chat| chat.summary()).collect()))
}

/// GET /api/chats/{id}/messages
pub async fn get_messages(
    AuthUser(principal): AuthUser,
    State(pool): State<SqlitePool>,
    Path(chat_id): Path<ChatId>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    directory::find_chat_for_member(&pool, chat_id, principal.user_id).await?;
    Ok(Json(messages::history(&pool, chat_id).await?))
}

/// POST /api/chats/{id}/messages
///
/// Persists the message as the caller and delivers it to both participants'
/// live connections.
pub async fn post_message(
    AuthUser(principal): AuthUser,
    State(state): State<AppState>,
    Path(chat_id): Path<ChatId>,
    Json(request): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), BackendError> {
    let message = send_and_fan_out(&state, chat_id, principal.user_id, &request.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/chats/{id}/message-count
pub async fn message_count(
    AuthUser(principal): AuthUser,
    State(pool): State<SqlitePool>,
    Path(chat_id): Path<ChatId>,
) -> Result<Json<MessageCountResponse>, BackendError> {
    directory::find_chat_for_member(&pool, chat_id, principal.user_id).await?;
    let count = messages::message_count(&pool, chat_id).await?;
    Ok(Json(MessageCountResponse { chat_id, count }))
}

/// GET /api/chats/{id}/last-message
pub async fn last_message(
    AuthUser(principal): AuthUser,
    State(pool): State<SqlitePool>,
    Path(chat_id): Path<ChatId>,
) -> Result<Json<ChatMessage>, BackendError> {
    directory::find_chat_for_member(&pool, chat_id, principal.user_id).await?;
    messages::last_message(&pool, chat_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::handler(StatusCode::NOT_FOUND, "Chat has no messages"))
}
