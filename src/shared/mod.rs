//! Shared Module
//!
//! Types shared by the HTTP surface and the connection protocol: wire
//! payloads, frame definitions, configuration and error types. Nothing in
//! here touches the network or the database.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Chat, message and frame types
pub mod messaging;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use messaging::{Chat, ChatId, ChatMessage, ClientFrame, ServerFrame, UserId};
