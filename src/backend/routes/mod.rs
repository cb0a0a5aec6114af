//! Route Configuration Module
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, middleware stack
//! - **`api_routes`** - Authentication, user and documentation endpoints
//! - **`chat_routes`** - Chat REST endpoints and the WebSocket endpoint
//!
//! # Middleware Order
//!
//! Outermost first: request tracing, request authenticator, authorization
//! policy. The authenticator never rejects; the policy returns 401 for
//! protected routes without a principal.

/// Main router creation
pub mod router;

/// Authentication and documentation routes
pub mod api_routes;

/// Chat and WebSocket routes
pub mod chat_routes;

// Re-export commonly used functions
pub use router::create_router;
