//! Chat directory integration tests
//!
//! Verifies that a pair of users resolves to exactly one chat no matter the
//! argument order or interleaving, and that history stays ordered.

use assert_matches::assert_matches;
use campus_chat::backend::chat::{
    find_all_for_participant, find_chat_for_member, get_or_create_chat, history, send_message,
};
use campus_chat::backend::error::ChatError;
use pretty_assertions::assert_eq;

use crate::common::TestDatabase;

const MAX_CHARS: usize = 2000;

async fn chat_rows(db: &TestDatabase) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM chats")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_concurrent_reversed_get_or_create_yields_one_chat() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(2).await;
    let (a, b) = (users[0].id, users[1].id);

    let (first, second) = tokio::join!(
        get_or_create_chat(db.pool(), a, b),
        get_or_create_chat(db.pool(), b, a)
    );

    let first = crate::assert_ok!(first);
    let second = crate::assert_ok!(second);
    assert_eq!(first, second);
    assert_eq!(chat_rows(&db).await, 1);
}

#[tokio::test]
async fn test_many_interleaved_calls_yield_one_chat() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(2).await;
    let (a, b) = (users[0].id, users[1].id);

    let mut handles = Vec::new();
    for n in 0..16 {
        let pool = db.pool().clone();
        let (x, y) = if n % 2 == 0 { (a, b) } else { (b, a) };
        handles.push(tokio::spawn(async move { get_or_create_chat(&pool, x, y).await }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(chat_rows(&db).await, 1);
}

#[tokio::test]
async fn test_participants_are_stored_in_canonical_order() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(2).await;

    let chat = get_or_create_chat(db.pool(), users[1].id, users[0].id)
        .await
        .unwrap();
    assert_eq!(chat.participants(), [users[0].id, users[1].id]);
}

#[tokio::test]
async fn test_unknown_participant() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(1).await;

    let result = get_or_create_chat(db.pool(), users[0].id, 404).await;
    crate::assert_err!(result, ChatError::ParticipantNotFound(404));
    assert_eq!(chat_rows(&db).await, 0);
}

#[tokio::test]
async fn test_self_chat() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(1).await;
    let me = users[0].id;

    let chat = get_or_create_chat(db.pool(), me, me).await.unwrap();
    assert!(chat.is_self_chat());
    assert_eq!(chat.recipients(), vec![me]);

    let again = get_or_create_chat(db.pool(), me, me).await.unwrap();
    assert_eq!(chat.id, again.id);
}

#[tokio::test]
async fn test_find_all_for_participant() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(3).await;

    get_or_create_chat(db.pool(), users[0].id, users[1].id).await.unwrap();
    get_or_create_chat(db.pool(), users[2].id, users[0].id).await.unwrap();
    get_or_create_chat(db.pool(), users[1].id, users[2].id).await.unwrap();

    let chats = find_all_for_participant(db.pool(), users[0].id).await.unwrap();
    assert_eq!(chats.len(), 2);
    assert!(chats.iter().all(|chat| chat.has_participant(users[0].id)));

    assert_matches!(
        find_all_for_participant(db.pool(), 77).await,
        Err(ChatError::ParticipantNotFound(77))
    );
}

#[tokio::test]
async fn test_find_chat_for_member_rejects_outsider() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(3).await;
    let chat = get_or_create_chat(db.pool(), users[0].id, users[1].id).await.unwrap();

    assert!(find_chat_for_member(db.pool(), chat.id, users[1].id).await.is_ok());
    assert_matches!(
        find_chat_for_member(db.pool(), chat.id, users[2].id).await,
        Err(ChatError::NotParticipant { .. })
    );
    assert_matches!(
        find_chat_for_member(db.pool(), chat.id + 100, users[0].id).await,
        Err(ChatError::ChatNotFound(_))
    );
}

#[tokio::test]
async fn test_send_message_checks_in_order() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(3).await;
    let chat = get_or_create_chat(db.pool(), users[0].id, users[1].id).await.unwrap();

    assert_matches!(
        send_message(db.pool(), 999, users[0].id, "hi", MAX_CHARS).await,
        Err(ChatError::ChatNotFound(999))
    );
    assert_matches!(
        send_message(db.pool(), chat.id, 555, "hi", MAX_CHARS).await,
        Err(ChatError::SenderNotFound(555))
    );
    assert_matches!(
        send_message(db.pool(), chat.id, users[2].id, "hi", MAX_CHARS).await,
        Err(ChatError::SenderNotParticipant { .. })
    );
    assert_matches!(
        send_message(db.pool(), chat.id, users[0].id, "", MAX_CHARS).await,
        Err(ChatError::InvalidContent(_))
    );
    assert_matches!(
        send_message(db.pool(), chat.id, users[0].id, "abcdef", 5).await,
        Err(ChatError::InvalidContent(_))
    );

    assert!(history(db.pool(), chat.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_is_ordered_by_send_time() {
    let db = TestDatabase::new().await;
    let users = db.seed_users(2).await;
    let chat = get_or_create_chat(db.pool(), users[0].id, users[1].id).await.unwrap();

    for n in 0..20 {
        let sender = users[n % 2].id;
        send_message(db.pool(), chat.id, sender, &format!("message {}", n), MAX_CHARS)
            .await
            .unwrap();
    }

    let messages = history(db.pool(), chat.id).await.unwrap();
    assert_eq!(messages.len(), 20);
    assert!(messages.windows(2).all(|w| w[0].sent_at < w[1].sent_at));
    assert_eq!(messages[0].content, "message 0");
    assert_eq!(messages[19].content, "message 19");
}

#[tokio::test]
async fn test_history_of_unknown_chat() {
    let db = TestDatabase::new().await;
    assert_matches!(history(db.pool(), 1).await, Err(ChatError::ChatNotFound(1)));
}
