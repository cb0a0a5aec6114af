//! Chat Module
//!
//! Two-party conversations and their messages.
//!
//! # Architecture
//!
//! - **`db`** - SQL for chats and messages
//! - **`directory`** - Get-or-create with canonical pair deduplication
//! - **`messages`** - Message persistence and ordered history
//! - **`handlers`** - REST endpoints under `/api/chats`
//!
//! Pairs are stored in canonical order under `UNIQUE(user_a_id, user_b_id)`;
//! `sent_at` strictly increases within a chat.

/// Database operations for chats and messages
pub mod db;

/// Chat directory
pub mod directory;

/// Message router (persistence side)
pub mod messages;

/// REST handlers
pub mod handlers;

pub use directory::{find_all_for_participant, find_chat, find_chat_for_member, get_or_create_chat};
pub use messages::{history, send_message, SentMessage};
