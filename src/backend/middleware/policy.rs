//! Route authorization policy.
//!
//! Every route requires a principal except those under `PUBLIC_ROUTES`.
//! A path is public when it equals an entry or continues it with a `/`
//! segment. The WebSocket endpoint is exempt because it authenticates
//! through its own handshake.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthenticatedUser;

/// Routes reachable without a principal
pub const PUBLIC_ROUTES: &[&str] = &["/api/auth", "/api/refresh-token", "/api-docs", "/ws-chat"];

pub fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|route| {
        path.strip_prefix(route)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Reject protected requests that carry no principal with 401
pub async fn require_principal(request: Request, next: Next) -> Result<Response, BackendError> {
    let path = request.uri().path();
    if is_public(path) || request.extensions().get::<AuthenticatedUser>().is_some() {
        return Ok(next.run(request).await);
    }

    tracing::debug!("Rejecting unauthenticated request to {}", path);
    Err(BackendError::unauthorized("Authentication required"))
}
