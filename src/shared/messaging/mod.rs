//! Messaging Module
//!
//! This module contains the data structures of the messaging core:
//!
//! - `Chat` - the deduplicated identity of a two-party conversation
//! - `ChatMessage` - an immutable message inside a chat
//! - `ClientFrame` / `ServerFrame` - frames of the long-lived connection protocol
//!
//! # Usage
//!
//! ```rust
//! use campus_chat::shared::messaging::{canonical_pair, Chat, ChatMessage, ClientFrame};
//! ```

pub mod chat;
pub mod message;
pub mod frame;

/// User identifier (the token subject)
pub type UserId = i64;

/// Chat surrogate identifier
pub type ChatId = i64;

/// Message surrogate identifier
pub type MessageId = i64;

// Re-export all types
pub use chat::{canonical_pair, Chat, ChatSummary, GetOrCreateChatRequest, ListChatsQuery};
pub use message::{
    validate_content, ChatMessage, HistoryRequest, MessageCountResponse, PostMessageRequest,
    SendMessageRequest,
};
pub use frame::{ClientFrame, ServerFrame};
