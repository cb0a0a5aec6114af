//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`refresh_token`** - POST /api/refresh-token - Token pair renewal
//! - **`get_me`** - GET /api/users/me - Current user info

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Refresh handler
pub mod refresh;

/// Get current user handler
pub mod me;

pub use types::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, UserResponse};

pub use register::register;
pub use login::login;
pub use refresh::refresh_token;
pub use me::get_me;

use axum::http::StatusCode;

use crate::backend::error::BackendError;

/// Run bcrypt on the blocking pool
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, BackendError>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| {
            tracing::error!("Password task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?
        .map_err(|e| {
            tracing::error!("bcrypt error: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })
}
