//! Real-time Delivery Module
//!
//! Long-lived WebSocket connections at `/ws-chat` and the routing of frames
//! to them.
//!
//! # Architecture
//!
//! - **`handshake`** - Resolves a connection's principal from `?token=`
//! - **`registry`** - Live connections keyed by user id
//! - **`broadcast`** - The `/topic/notifications` channel
//! - **`fanout`** - Sends a message and delivers it to the chat's participants
//! - **`dispatch`** - Handles inbound client frames
//! - **`socket`** - The upgrade handler and per-connection loop

/// Announcement broadcasting
pub mod broadcast;

/// Handshake authentication
pub mod handshake;

/// Connection registry
pub mod registry;

/// Message fan-out
pub mod fanout;

/// Inbound frame dispatch
pub mod dispatch;

/// WebSocket handler
pub mod socket;

// Re-export commonly used types and functions
pub use broadcast::{broadcast_announcement, AnnouncementBroadcast};
pub use handshake::{ConnectionPrincipal, HandshakeAuthenticator};
pub use registry::{ConnectionId, ConnectionRegistry};
pub use socket::ws_handler;
