/**
 * Request Authenticator
 *
 * Extracts the bearer token from the Authorization header and, if it
 * verifies, attaches the subject to the request extensions for the rest of
 * the request. Nothing is persisted and no storage is touched.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::tokens::TokenService;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::messaging::UserId;

/// Principal resolved from a verified token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware
///
/// 1. Extracts the bearer token, if any
/// 2. Verifies it and extracts the subject
/// 3. Attaches `AuthenticatedUser` to the request extensions
///
/// Missing, malformed or expired tokens leave the request unauthenticated.
/// Rejection is left to `policy::require_principal`.
pub async fn authenticate_request(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match tokens.extract_subject(token) {
            Ok(user_id) => {
                request.extensions_mut().insert(AuthenticatedUser { user_id });
            }
            Err(e) => {
                tracing::debug!("Ignoring bearer token on {}: {}", request.uri().path(), e);
            }
        }
    }

    next.run(request).await
}

/// Axum extractor for the authenticated user
///
/// Rejects with 401 when the request carries no principal.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| BackendError::unauthorized("Authentication required"))
    }
}
