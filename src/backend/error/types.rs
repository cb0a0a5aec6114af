/**
 * Backend Error Types
 *
 * Token errors become 401 on HTTP and downgrade a handshake to anonymous.
 * Chat errors map to 4xx on HTTP and drop the frame on a connection.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{ConfigError, SharedError};
use crate::shared::messaging::{ChatId, UserId};

/// Token service failures
#[derive(Debug, Error)]
pub enum TokenError {
    /// No token was presented
    #[error("Missing token")]
    Missing,

    /// Bad signature, malformed structure or unusable subject
    #[error("Invalid token")]
    Invalid,

    /// Signature verified but the token is past its expiry
    #[error("Token expired")]
    Expired,

    /// Encoding a new token failed
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Chat directory and message router failures
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Participant {0} not found")]
    ParticipantNotFound(UserId),

    #[error("Chat {0} not found")]
    ChatNotFound(ChatId),

    #[error("Sender {0} not found")]
    SenderNotFound(UserId),

    /// The sender exists but is not one of the chat's two participants
    #[error("User {sender_id} is not a participant of chat {chat_id}")]
    SenderNotParticipant { chat_id: ChatId, sender_id: UserId },

    /// The caller asked for a chat they do not belong to
    #[error("User {user_id} is not a participant of chat {chat_id}")]
    NotParticipant { chat_id: ChatId, user_id: UserId },

    /// A connection tried to send on behalf of another user
    #[error("Sender {claimed} does not match connection principal {principal}")]
    SenderMismatch { claimed: UserId, principal: UserId },

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ChatError {
    /// HTTP status for this failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ParticipantNotFound(_) | Self::ChatNotFound(_) => StatusCode::NOT_FOUND,
            Self::SenderNotFound(_) | Self::InvalidContent(_) => StatusCode::BAD_REQUEST,
            Self::SenderNotParticipant { .. }
            | Self::NotParticipant { .. }
            | Self::SenderMismatch { .. } => StatusCode::FORBIDDEN,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SharedError> for ChatError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { message, .. } => Self::InvalidContent(message),
            SharedError::SerializationError { message } => Self::InvalidContent(message),
        }
    }
}

/// Backend-specific error types
///
/// Each variant can be converted to an HTTP response.
///
/// ```rust
/// use axum::http::StatusCode;
/// use campus_chat::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::CONFLICT, "User already registered");
/// assert_eq!(err.status_code(), StatusCode::CONFLICT);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Shared error (validation or decoding of wire types)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 401 handler error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Token` - 401, except signing failures (500)
    /// - `Chat` - See `ChatError::status_code`
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - Everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Token(TokenError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Chat(err) => err.status_code(),
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Config(_) | Self::SerializationError(_) | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error message
    ///
    /// Storage failures are reported generically; their detail only goes to
    /// the log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Chat(ChatError::Database(_)) | Self::Database(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
