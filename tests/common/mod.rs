//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - Authentication test helpers
//! - Custom assertion macros

pub mod database;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;
