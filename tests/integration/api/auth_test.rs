//! Authentication API integration tests
//!
//! Tests for registration, login, token refresh, the current-user endpoint
//! and the request authenticator's route policy.

use axum::http::StatusCode;
use campus_chat::backend::auth::{TokenResponse, UserResponse};
use serde_json::{json, Value};

use crate::common::{create_test_server, create_test_state, create_test_user};

#[tokio::test]
async fn test_register_success() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "firstName": "Ada",
            "surname": "Lovelace",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let user: UserResponse = response.json();
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.status, "ACTIVE");
    assert_eq!(user.roles, vec!["USER".to_string()]);
}

#[tokio::test]
async fn test_register_duplicate_name_ignores_case() {
    let state = create_test_state().await;
    let server = create_test_server(&state);
    create_test_user(&state, "Ada", "Lovelace").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "firstName": "ADA",
            "surname": "lovelace",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_short_password() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "firstName": "Ada",
            "surname": "Lovelace",
            "password": "short"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let state = create_test_state().await;
    let server = create_test_server(&state);
    let user = create_test_user(&state, "Ada", "Lovelace").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "firstName": "Ada",
            "surname": "Lovelace",
            "password": crate::common::TEST_PASSWORD
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let tokens: TokenResponse = response.json();
    assert_eq!(state.tokens.extract_subject(&tokens.access_token).unwrap(), user.id());
    assert_eq!(state.tokens.extract_subject(&tokens.refresh_token).unwrap(), user.id());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let state = create_test_state().await;
    let server = create_test_server(&state);
    create_test_user(&state, "Ada", "Lovelace").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "firstName": "Ada",
            "surname": "Lovelace",
            "password": "not-the-password"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid credentials");
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "firstName": "Nobody",
            "surname": "Here",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let state = create_test_state().await;
    let server = create_test_server(&state);
    let user = create_test_user(&state, "Ada", "Lovelace").await;

    let response = server
        .post("/api/refresh-token")
        .json(&json!({ "refreshToken": user.refresh_token }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let tokens: TokenResponse = response.json();
    assert!(state.tokens.is_valid(&tokens.access_token, user.id()));
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server
        .post("/api/refresh-token")
        .json(&json!({ "refreshToken": "not.a.token" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_caller() {
    let state = create_test_state().await;
    let server = create_test_server(&state);
    let user = create_test_user(&state, "Ada", "Lovelace").await;

    let response = server
        .get("/api/users/me")
        .authorization_bearer(&user.access_token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let me: UserResponse = response.json();
    assert_eq!(me.id, user.id());
    assert_eq!(me.surname, "Lovelace");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server.get("/api/users/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server.get("/api/chats").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server
        .get("/api/users/me")
        .authorization_bearer("garbage")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // Public routes still work with a bad token attached
    let response = server
        .get("/api-docs")
        .authorization_bearer("garbage")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_docs_lists_routes() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server.get("/api-docs").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let routes: Vec<Value> = response.json();
    let login = routes
        .iter()
        .find(|route| route["path"] == "/api/auth/login")
        .expect("login route listed");
    assert_eq!(login["requiresAuth"], false);

    let chats = routes
        .iter()
        .find(|route| route["path"] == "/api/chats")
        .expect("chats route listed");
    assert_eq!(chats["requiresAuth"], true);
}

#[tokio::test]
async fn test_websocket_endpoint_skips_request_authentication() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    // Not an upgrade request, but the policy must not answer 401
    let response = server.get("/ws-chat").await;
    assert_ne!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_with_token() {
    let state = create_test_state().await;
    let server = create_test_server(&state);
    let user = create_test_user(&state, "Ada", "Lovelace").await;

    let response = server
        .get("/api/does-not-exist")
        .authorization_bearer(&user.access_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_look_alike_of_public_route_requires_token() {
    let state = create_test_state().await;
    let server = create_test_server(&state);

    let response = server.get("/ws-chatter").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server.get("/api-docsx").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
