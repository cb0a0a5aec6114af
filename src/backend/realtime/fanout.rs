//! Message fan-out
//!
//! After a message is persisted it is delivered on `/user/queue/messages`
//! to each distinct participant of its chat: two users for a normal chat,
//! one for a self-chat. Offline participants are skipped; they pick the
//! message up from history.

use crate::backend::chat::messages::send_message;
use crate::backend::error::ChatError;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{Chat, ChatId, ChatMessage, ServerFrame, UserId};

/// Deliver a persisted message to the chat's participants.
///
/// Returns the number of connections that accepted it.
pub fn fan_out(registry: &ConnectionRegistry, chat: &Chat, message: &ChatMessage) -> usize {
    let frame = ServerFrame::Message(message.clone());
    chat.recipients()
        .into_iter()
        .map(|user_id| {
            let delivered = registry.send_to_user(user_id, &frame);
            if delivered == 0 {
                tracing::debug!("User {} offline, message {} left in history", user_id, message.id);
            }
            delivered
        })
        .sum()
}

/// Persist a message and deliver it to both participants
pub async fn send_and_fan_out(
    state: &AppState,
    chat_id: ChatId,
    sender_id: UserId,
    content: &str,
) -> Result<ChatMessage, ChatError> {
    let sent = send_message(
        &state.db_pool,
        chat_id,
        sender_id,
        content,
        state.config.max_message_length,
    )
    .await?;

    let delivered = fan_out(&state.registry, &sent.chat, &sent.message);
    tracing::debug!(
        "Message {} in chat {} delivered to {} connections",
        sent.message.id,
        chat_id,
        delivered
    );
    Ok(sent.message)
}
