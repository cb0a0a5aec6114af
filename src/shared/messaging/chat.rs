//! Chat Data Structure
//!
//! A chat is the conversation between exactly two participants. The pair is
//! unordered: `(a, b)` and `(b, a)` name the same chat, so it is always stored
//! in canonical order (smaller id first). A self-chat (`a == b`) is allowed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatId, UserId};

/// Order a participant pair canonically.
pub fn canonical_pair(a: UserId, b: UserId) -> (UserId, UserId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A two-party conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Surrogate chat ID
    pub id: ChatId,
    /// First participant in stored (canonical) order
    pub user_a_id: UserId,
    /// Second participant in stored (canonical) order
    pub user_b_id: UserId,
    /// When the chat was created
    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// Both participants in stored order
    pub fn participants(&self) -> [UserId; 2] {
        [self.user_a_id, self.user_b_id]
    }

    /// Check if user is a participant
    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.user_a_id == user_id || self.user_b_id == user_id
    }

    /// Whether both participants are the same user
    pub fn is_self_chat(&self) -> bool {
        self.user_a_id == self.user_b_id
    }

    /// Distinct identities that receive a delivery for this chat.
    ///
    /// A self-chat yields a single recipient.
    pub fn recipients(&self) -> Vec<UserId> {
        if self.is_self_chat() {
            vec![self.user_a_id]
        } else {
            vec![self.user_a_id, self.user_b_id]
        }
    }

    /// The summary returned by the REST surface
    pub fn summary(&self) -> ChatSummary {
        ChatSummary {
            id: self.id,
            user_a_id: self.user_a_id,
            user_b_id: self.user_b_id,
        }
    }
}

/// Chat as exposed over HTTP
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: ChatId,
    pub user_a_id: UserId,
    pub user_b_id: UserId,
}

/// Request body for `POST /api/chats/get-or-create`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrCreateChatRequest {
    pub user_a_id: UserId,
    pub user_b_id: UserId,
}

/// Query for `GET /api/chats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChatsQuery {
    pub user_id: Option<UserId>,
}
