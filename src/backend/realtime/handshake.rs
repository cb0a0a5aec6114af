//! Handshake Authenticator
//!
//! Browsers cannot set headers on a WebSocket handshake, so the access token
//! travels as `?token=` on the upgrade URL. The principal resolved here is
//! bound to the connection for its whole lifetime and never re-checked.
//!
//! A missing or bad token does not fail the handshake: the connection falls
//! back to an anonymous principal, which may only receive announcements.

use std::sync::Arc;

use axum::extract::Query;
use axum::http::Uri;
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::auth::tokens::TokenService;
use crate::shared::messaging::UserId;

#[derive(Debug, Default, Deserialize)]
struct HandshakeQuery {
    token: Option<String>,
}

/// Identity bound to a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPrincipal {
    /// Verified token subject
    Authenticated(UserId),
    /// Fallback for connections without a usable token
    Anonymous(Uuid),
}

impl ConnectionPrincipal {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            ConnectionPrincipal::Authenticated(user_id) => Some(*user_id),
            ConnectionPrincipal::Anonymous(_) => None,
        }
    }
}

/// Resolves connection principals from handshake URIs
#[derive(Clone)]
pub struct HandshakeAuthenticator {
    tokens: Arc<TokenService>,
}

impl HandshakeAuthenticator {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolve the principal for a handshake. Never fails.
    pub fn resolve(&self, uri: &Uri) -> ConnectionPrincipal {
        let Some(token) = token_param(uri) else {
            let principal = ConnectionPrincipal::Anonymous(Uuid::new_v4());
            tracing::debug!("Handshake without token, connection is {:?}", principal);
            return principal;
        };

        match self.tokens.extract_subject(&token) {
            Ok(user_id) => {
                tracing::info!("Handshake authenticated user {}", user_id);
                ConnectionPrincipal::Authenticated(user_id)
            }
            Err(e) => {
                let principal = ConnectionPrincipal::Anonymous(Uuid::new_v4());
                tracing::warn!("Handshake token rejected ({}), connection is {:?}", e, principal);
                principal
            }
        }
    }
}

/// `token` query parameter, tolerating a `Bearer ` prefix
fn token_param(uri: &Uri) -> Option<String> {
    let Query(query) = Query::<HandshakeQuery>::try_from_uri(uri).ok()?;
    let token = query.token?;
    let token = token.strip_prefix("Bearer ").unwrap_or(&token).trim();
    (!token.is_empty()).then(|| token.to_string())
}
