//! Middleware Module
//!
//! HTTP middleware that runs before handlers.
//!
//! # Architecture
//!
//! - **`auth`** - Request authenticator: resolves a principal from the bearer
//!   token and never rejects
//! - **`policy`** - Authorization policy: rejects requests without a principal
//!   unless the route is exempt
//!
//! The two are layered in that order, so authentication failures only ever
//! show up as "no principal".

pub mod auth;
pub mod policy;

pub use auth::{authenticate_request, bearer_token, AuthUser, AuthenticatedUser};
pub use policy::{is_public, require_principal};
