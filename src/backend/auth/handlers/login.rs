/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Authentication Process
 *
 * 1. Look up user by first name and surname
 * 2. Verify password using bcrypt
 * 3. Issue an access and a refresh token
 *
 * Unknown users and wrong passwords both return 401 with the same message.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::run_blocking;
use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::tokens::TokenService;
use crate::backend::auth::users::get_user_by_name;
use crate::backend::error::BackendError;

const BAD_CREDENTIALS: &str = "Invalid credentials";

/// Login handler
pub async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let first_name = request.first_name.trim();
    let surname = request.surname.trim();
    tracing::info!("Login request for: {} {}", first_name, surname);

    let user = get_user_by_name(&pool, first_name, surname)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {} {}", first_name, surname);
            BackendError::unauthorized(BAD_CREDENTIALS)
        })?;

    let password = request.password;
    let hash = user.password_hash.clone();
    let valid = run_blocking(move || bcrypt::verify(password, &hash)).await?;

    if !valid {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    }

    let response = TokenResponse {
        access_token: tokens.issue_access_token(&user)?,
        refresh_token: tokens.issue_refresh_token(&user)?,
    };

    tracing::info!("User logged in: {}", user.id);
    Ok(Json(response))
}
