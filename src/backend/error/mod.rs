//! Backend Error Module
//!
//! `BackendError` implements `IntoResponse`, so handlers return it directly.
//! The body is always `{"error": <message>, "status": <code>}`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, ChatError, TokenError};
