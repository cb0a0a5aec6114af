//! Connection Protocol Frames
//!
//! Every frame on `/ws-chat` is a JSON text message of the form
//! `{"destination": "<address>", "body": <payload>}`. Client frames address
//! `/app/...` handlers; server frames are delivered either on a private
//! `/user/queue/...` channel or on the shared `/topic/notifications` channel.

use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, HistoryRequest, SendMessageRequest};
use crate::shared::error::SharedError;

pub const APP_CHAT_SEND: &str = "/app/chat.send";
pub const APP_CHAT_HISTORY: &str = "/app/chat.history";
pub const APP_NOTIFICATION_SEND: &str = "/app/notification.send";
pub const APP_NOTIFICATION_BROADCAST: &str = "/app/notification.broadcast";

pub const USER_QUEUE_MESSAGES: &str = "/user/queue/messages";
pub const USER_QUEUE_HISTORY: &str = "/user/queue/history";
pub const USER_QUEUE_NOTIFICATIONS: &str = "/user/queue/notifications";
pub const TOPIC_NOTIFICATIONS: &str = "/topic/notifications";

/// Frames sent by clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "destination", content = "body")]
pub enum ClientFrame {
    #[serde(rename = "/app/chat.send")]
    ChatSend(SendMessageRequest),
    #[serde(rename = "/app/chat.history")]
    ChatHistory(HistoryRequest),
    #[serde(rename = "/app/notification.send")]
    NotificationSend(String),
    #[serde(rename = "/app/notification.broadcast")]
    NotificationBroadcast(String),
}

impl ClientFrame {
    /// Parse a text frame
    pub fn decode(text: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn destination(&self) -> &'static str {
        match self {
            ClientFrame::ChatSend(_) => APP_CHAT_SEND,
            ClientFrame::ChatHistory(_) => APP_CHAT_HISTORY,
            ClientFrame::NotificationSend(_) => APP_NOTIFICATION_SEND,
            ClientFrame::NotificationBroadcast(_) => APP_NOTIFICATION_BROADCAST,
        }
    }
}

/// Frames delivered to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "destination", content = "body")]
pub enum ServerFrame {
    /// A new message in one of the recipient's chats
    #[serde(rename = "/user/queue/messages")]
    Message(ChatMessage),
    /// Ordered history, oldest first
    #[serde(rename = "/user/queue/history")]
    History(Vec<ChatMessage>),
    #[serde(rename = "/user/queue/notifications")]
    Notification(String),
    /// Announcement on the shared topic
    #[serde(rename = "/topic/notifications")]
    Announcement(String),
}

impl ServerFrame {
    /// Serialize into a text frame
    pub fn encode(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn destination(&self) -> &'static str {
        match self {
            ServerFrame::Message(_) => USER_QUEUE_MESSAGES,
            ServerFrame::History(_) => USER_QUEUE_HISTORY,
            ServerFrame::Notification(_) => USER_QUEUE_NOTIFICATIONS,
            ServerFrame::Announcement(_) => TOPIC_NOTIFICATIONS,
        }
    }
}
