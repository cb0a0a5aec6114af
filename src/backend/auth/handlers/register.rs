/**
 * Registration Handler
 *
 * POST /api/auth/register
 *
 * # Validation
 *
 * - First name and surname must not be blank
 * - Password must be at least 8 characters long
 * - The (first name, surname) pair must be unused, compared case-insensitively
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::run_blocking;
use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::users::{create_user, get_user_by_name, is_unique_violation};
use crate::backend::error::BackendError;
use crate::shared::config::AppConfig;
use crate::shared::SharedError;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn validate(request: &RegisterRequest) -> Result<(), SharedError> {
    if request.first_name.trim().is_empty() {
        return Err(SharedError::validation("firstName", "First name is required"));
    }
    if request.surname.trim().is_empty() {
        return Err(SharedError::validation("surname", "Surname is required"));
    }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - Blank name or short password
/// * `409 Conflict` - A user with this name already exists
pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    validate(&request)?;
    let first_name = request.first_name.trim();
    let surname = request.surname.trim();

    if get_user_by_name(&pool, first_name, surname).await?.is_some() {
        tracing::warn!("Registration for existing user: {} {}", first_name, surname);
        return Err(BackendError::handler(StatusCode::CONFLICT, "User already registered"));
    }

    let cost = config.bcrypt_cost;
    let password = request.password;
    let password_hash = run_blocking(move || bcrypt::hash(password, cost)).await?;

    let user = create_user(&pool, first_name, surname, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::handler(StatusCode::CONFLICT, "User already registered")
            } else {
                BackendError::from(e)
            }
        })?;

    tracing::info!("User registered: {} (id {})", user.first_name, user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
