//! WebSocket endpoint integration tests
//!
//! Real `/ws-chat` upgrades over a bound socket: handshake binding, private
//! delivery through the connection loop, the anonymous fallback and cleanup
//! on close.

use std::time::Duration;

use axum_test::{TestServer, TestWebSocket};
use campus_chat::backend::chat::get_or_create_chat;
use campus_chat::backend::server::AppState;
use campus_chat::shared::messaging::ServerFrame;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_http_test_server, create_test_state, create_test_user};

const QUIET_PERIOD: Duration = Duration::from_millis(200);

async fn open_socket(server: &TestServer, token: &str) -> TestWebSocket {
    server
        .get_websocket("/ws-chat")
        .add_query_param("token", token)
        .await
        .into_websocket()
        .await
}

/// Connection tasks register after the upgrade completes, so poll.
async fn wait_for_connections(state: &AppState, user_id: i64, expected: usize) {
    for _ in 0..200 {
        if state.registry.connection_count(user_id) == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "User {} has {} connections, expected {}",
        user_id,
        state.registry.connection_count(user_id),
        expected
    );
}

#[tokio::test]
async fn test_handshake_token_binds_connection() {
    let state = create_test_state().await;
    let server = create_http_test_server(&state);
    let alice = create_test_user(&state, "Alice", "Smith").await;

    let socket = open_socket(&server, &alice.access_token).await;
    wait_for_connections(&state, alice.id(), 1).await;

    socket.close().await;
    wait_for_connections(&state, alice.id(), 0).await;
}

#[tokio::test]
async fn test_send_over_socket_reaches_both_participants_only() {
    let state = create_test_state().await;
    let server = create_http_test_server(&state);
    let alice = create_test_user(&state, "Alice", "Smith").await;
    let bob = create_test_user(&state, "Bob", "Jones").await;
    let chat = get_or_create_chat(&state.db_pool, alice.id(), bob.id())
        .await
        .unwrap();

    let mut alice_ws = open_socket(&server, &alice.access_token).await;
    let mut bob_ws = open_socket(&server, &bob.access_token).await;
    let mut stranger_ws = open_socket(&server, "garbage").await;
    wait_for_connections(&state, alice.id(), 1).await;
    wait_for_connections(&state, bob.id(), 1).await;

    alice_ws
        .send_json(&json!({
            "destination": "/app/chat.send",
            "body": { "chatId": chat.id, "senderId": alice.id(), "content": "hi" }
        }))
        .await;

    for ws in [&mut alice_ws, &mut bob_ws] {
        match ws.receive_json::<ServerFrame>().await {
            ServerFrame::Message(message) => {
                assert_eq!(message.chat_id, chat.id);
                assert_eq!(message.sender_id, alice.id());
                assert_eq!(message.content, "hi");
            }
            other => panic!("Expected message frame, got {:?}", other),
        }
    }

    let nothing = tokio::time::timeout(QUIET_PERIOD, stranger_ws.receive_message()).await;
    assert!(nothing.is_err(), "anonymous connection received a private frame");

    bob_ws.close().await;
    wait_for_connections(&state, bob.id(), 0).await;
    assert_eq!(state.registry.connection_count(alice.id()), 1);
}

#[tokio::test]
async fn test_anonymous_connection_receives_announcements() {
    let state = create_test_state().await;
    let server = create_http_test_server(&state);
    let alice = create_test_user(&state, "Alice", "Smith").await;

    let mut alice_ws = open_socket(&server, &alice.access_token).await;
    let mut anonymous_ws = server
        .get_websocket("/ws-chat")
        .await
        .into_websocket()
        .await;
    wait_for_connections(&state, alice.id(), 1).await;
    // The anonymous connection subscribes to announcements after its upgrade
    tokio::time::sleep(QUIET_PERIOD).await;

    alice_ws
        .send_json(&json!({
            "destination": "/app/notification.broadcast",
            "body": "library closes early"
        }))
        .await;

    let expected = ServerFrame::Announcement("library closes early".into());
    assert_eq!(anonymous_ws.receive_json::<ServerFrame>().await, expected);
    assert_eq!(alice_ws.receive_json::<ServerFrame>().await, expected);
}

#[tokio::test]
async fn test_anonymous_connection_cannot_send() {
    let state = create_test_state().await;
    let server = create_http_test_server(&state);
    let alice = create_test_user(&state, "Alice", "Smith").await;
    let bob = create_test_user(&state, "Bob", "Jones").await;
    let chat = get_or_create_chat(&state.db_pool, alice.id(), bob.id())
        .await
        .unwrap();

    let mut bob_ws = open_socket(&server, &bob.access_token).await;
    let mut anonymous_ws = open_socket(&server, "not-a-token").await;
    wait_for_connections(&state, bob.id(), 1).await;

    anonymous_ws
        .send_json(&json!({
            "destination": "/app/chat.send",
            "body": { "chatId": chat.id, "senderId": alice.id(), "content": "spoofed" }
        }))
        .await;

    let nothing = tokio::time::timeout(QUIET_PERIOD, bob_ws.receive_message()).await;
    assert!(nothing.is_err(), "spoofed send was delivered");
}
