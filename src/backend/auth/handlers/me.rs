/**
 * Get Current User Handler
 *
 * GET /api/users/me returns the authenticated user's profile. The principal
 * comes from the request authenticator; this handler never parses tokens.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - No principal on the request
/// * `404 Not Found` - The token's user has been removed
pub async fn get_me(
    AuthUser(principal): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<Json<UserResponse>, BackendError> {
    let user = get_user_by_id(&pool, principal.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", principal.user_id);
            BackendError::handler(StatusCode::NOT_FOUND, "User not found")
        })?;

    Ok(Json(UserResponse::from(&user)))
}
