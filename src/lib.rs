//! Campus Chat - Real-time messaging core
//!
//! Stateless token identity combined with two-party chats delivered over
//! long-lived WebSocket connections.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types, frames, configuration and shared errors
//! - **`backend`** - Axum server, authentication, chat directory, message
//!   routing and connection registry
//!
//! # Usage
//!
//! ```rust,no_run
//! use campus_chat::backend::server::{build_state, create_app};
//! use campus_chat::backend::server::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//! let addr = config.bind_addr;
//! let app = create_app(build_state(config).await?);
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
