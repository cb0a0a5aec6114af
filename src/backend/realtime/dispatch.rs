//! Inbound frame dispatch
//!
//! Connection-protocol sends are one-way: there is no reply path for a
//! failed frame, so every failure is logged and the frame dropped. Only
//! authenticated connections may address `/app/...`; anonymous connections
//! are limited to receiving announcements.

use crate::backend::chat::{directory, messages};
use crate::backend::error::{BackendError, ChatError, TokenError};
use crate::backend::realtime::broadcast::broadcast_announcement;
use crate::backend::realtime::fanout::send_and_fan_out;
use crate::backend::realtime::handshake::ConnectionPrincipal;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{validate_content, ClientFrame, ServerFrame};

/// Handle one text frame from a connection, logging and dropping failures
pub async fn handle_text(state: &AppState, principal: &ConnectionPrincipal, text: &str) {
    let frame = match ClientFrame::decode(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("Dropping unparsable frame from {:?}: {}", principal, e);
            return;
        }
    };

    let destination = frame.destination();
    tracing::debug!("Frame for {} from {:?}", destination, principal);

    if let Err(e) = handle_client_frame(state, principal, frame).await {
        tracing::warn!("Dropping frame for {} from {:?}: {}", destination, principal, e);
    }
}

/// Handle a decoded client frame
pub async fn handle_client_frame(
    state: &AppState,
    principal: &ConnectionPrincipal,
    frame: ClientFrame,
) -> Result<(), BackendError> {
    let user_id = principal.user_id().ok_or(TokenError::Missing)?;

    match frame {
        ClientFrame::ChatSend(request) => {
            if request.sender_id != user_id {
                return Err(ChatError::SenderMismatch {
                    claimed: request.sender_id,
                    principal: user_id,
                }
                .into());
            }
            send_and_fan_out(state, request.chat_id, request.sender_id, &request.content).await?;
        }
        ClientFrame::ChatHistory(request) => {
            let chat = directory::find_chat_for_member(&state.db_pool, request.chat_id, user_id).await?;
            let history = messages::history(&state.db_pool, chat.id).await?;
            state
                .registry
                .send_to_user(user_id, &ServerFrame::History(history));
        }
        ClientFrame::NotificationSend(text) => {
            validate_content(&text, state.config.max_message_length)?;
            state
                .registry
                .send_to_user(user_id, &ServerFrame::Notification(text));
        }
        ClientFrame::NotificationBroadcast(text) => {
            validate_content(&text, state.config.max_message_length)?;
            broadcast_announcement(&state.announcements, text);
        }
    }

    Ok(())
}
