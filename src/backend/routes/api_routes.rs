/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/refresh-token` - Token refresh
 *
 * ## Users
 * - `GET /api/users/me` - Current user (requires authentication)
 *
 * ## Documentation (public)
 * - `GET /api-docs` - Route listing
 */

use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::backend::auth::{get_me, login, refresh_token, register};
use crate::backend::middleware::is_public;
use crate::backend::server::state::AppState;

/// Every route the server exposes, as (method, path)
pub const ROUTES: &[(&str, &str)] = &[
    ("POST", "/api/auth/register"),
    ("POST", "/api/auth/login"),
    ("POST", "/api/refresh-token"),
    ("GET", "/api/users/me"),
    ("POST", "/api/chats/get-or-create"),
    ("GET", "/api/chats"),
    ("GET", "/api/chats/{id}/messages"),
    ("POST", "/api/chats/{id}/messages"),
    ("GET", "/api/chats/{id}/message-count"),
    ("GET", "/api/chats/{id}/last-message"),
    ("GET", "/ws-chat"),
    ("GET", "/api-docs"),
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
}

/// GET /api-docs
pub async fn api_docs() -> Json<Vec<RouteDoc>> {
    Json(
        ROUTES
            .iter()
            .map(|&(method, path)| RouteDoc {
                method,
                path,
                requires_auth: !is_public(path),
            })
            .collect(),
    )
}

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/refresh-token", post(refresh_token))
        // User endpoints
        .route("/api/users/me", get(get_me))
        // Documentation
        .route("/api-docs", get(api_docs))
}
