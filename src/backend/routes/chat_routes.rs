/**
 * Chat Route Configuration
 *
 * # Routes
 *
 * - `POST /api/chats/get-or-create`
 * - `GET /api/chats`
 * - `GET|POST /api/chats/{id}/messages`
 * - `GET /api/chats/{id}/message-count`
 * - `GET /api/chats/{id}/last-message`
 * - `GET /ws-chat` - WebSocket upgrade, authenticated by `?token=`
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::chat::handlers::{
    get_messages, get_or_create, last_message, list_chats, message_count, post_message,
};
use crate::backend::realtime::ws_handler;
use crate::backend::server::state::AppState;

/// Configure chat-related routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/chats", get(list_chats))
        .route("/api/chats/get-or-create", post(get_or_create))
        .route("/api/chats/{id}/messages", get(get_messages).post(post_message))
        .route("/api/chats/{id}/message-count", get(message_count))
        .route("/api/chats/{id}/last-message", get(last_message))
        // Long-lived connection endpoint
        .route("/ws-chat", get(ws_handler))
}
