//! Authentication Module
//!
//! This module handles user registration, login and token refresh. Identity
//! is stateless: every request and every long-lived connection proves who it
//! is with a signed token issued here.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`tokens`** - Access/refresh token issuance and verification
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: name and password → user created
//! 2. **Login**: name and password verified → access and refresh token
//! 3. **Refresh**: refresh token verified → new token pair
//! 4. **Me**: access token verified by middleware → user info returned

/// User data model and database operations
pub mod users;

/// Token issuance and verification
pub mod tokens;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, UserResponse};
pub use handlers::{get_me, login, refresh_token, register};
pub use tokens::{Claims, TokenService};
pub use users::User;
