//! Test suite for Campus Chat
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
