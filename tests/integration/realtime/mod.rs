//! Real-time integration tests
//!
//! - `routing_test` - dispatch, fan-out and announcements against registry
//!   queues
//! - `socket_test` - the same paths through real `/ws-chat` upgrades

mod socket_test;
