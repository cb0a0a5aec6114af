//! Backend Module
//!
//! All server-side code: the Axum HTTP server, authentication, the chat
//! directory and message router, and real-time delivery over WebSockets.
//!
//! # Architecture
//!
//! - **`server`** - Application state, configuration loading, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Users, tokens and authentication handlers
//! - **`middleware`** - Request authenticator and route policy
//! - **`chat`** - Chat directory, message persistence, REST handlers
//! - **`realtime`** - Handshake, connection registry, fan-out, WebSocket loop
//! - **`error`** - Backend-specific error types

pub mod server;
pub mod routes;
pub mod auth;
pub mod middleware;
pub mod chat;
pub mod realtime;
pub mod error;
