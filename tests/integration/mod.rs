//! Integration tests
//!
//! - `api` - HTTP endpoints through the full router
//! - `database` - Chat directory against a real SQLite database
//! - `realtime` - Connection registry, fan-out and frame dispatch

pub mod realtime;
