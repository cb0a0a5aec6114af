//! POST /api/refresh-token
//!
//! Exchanges a refresh token for a new token pair. Fails with 401 when the
//! token is invalid or expired, or when its subject no longer exists.

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{RefreshRequest, TokenResponse};
use crate::backend::auth::tokens::TokenService;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;

pub async fn refresh_token(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let subject = tokens.extract_subject(&request.refresh_token).map_err(|e| {
        tracing::warn!("Refresh rejected: {}", e);
        e
    })?;

    let user = get_user_by_id(&pool, subject)
        .await?
        .ok_or_else(|| BackendError::unauthorized("Unknown token subject"))?;

    if !tokens.is_valid(&request.refresh_token, user.id) {
        return Err(BackendError::unauthorized("Token subject mismatch"));
    }

    tracing::debug!("Issuing refreshed tokens for user {}", user.id);
    Ok(Json(TokenResponse {
        access_token: tokens.issue_access_token(&user)?,
        refresh_token: tokens.issue_refresh_token(&user)?,
    }))
}
