//! Server Module
//!
//! Builds the application state and the Axum app.
//!
//! # Architecture
//!
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`config`** - Configuration loading and database connection
//! - **`init`** - State construction and app creation
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `.env`, optional TOML file, environment
//! 2. **Database**: connect and run migrations
//! 3. **State Creation**: token service, registry, announcement channel
//! 4. **Router Creation**: routes and middleware
//! 5. **Background Tasks**: periodic registry pruning

/// Application state management
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::{build_state, create_app};
