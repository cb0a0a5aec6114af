//! WebSocket handler for `/ws-chat`.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::Uri;
use axum::response::Response;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use crate::backend::realtime::dispatch::handle_text;
use crate::backend::realtime::handshake::ConnectionPrincipal;
use crate::backend::server::state::AppState;
use crate::shared::messaging::ServerFrame;

/// `GET /ws-chat?token=...`, the WebSocket upgrade.
///
/// The principal is resolved before the upgrade and never fails it.
pub async fn ws_handler(
    State(state): State<AppState>,
    uri: Uri,
    ws: WebSocketUpgrade,
) -> Response {
    let principal = state.handshake.resolve(&uri);
    ws.on_upgrade(move |socket| handle_socket(socket, state, principal))
}

/// Per-connection loop.
async fn handle_socket(socket: WebSocket, state: AppState, principal: ConnectionPrincipal) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Anonymous connections keep a queue nobody else can reach.
    let (tx, mut rx) = mpsc::channel::<ServerFrame>(state.config.outbound_queue_capacity);
    let registration = principal
        .user_id()
        .map(|user_id| (user_id, state.registry.register(user_id, tx.clone())));
    let mut announcements = state.announcements.subscribe();

    tracing::info!("Connection opened for {:?}", principal);

    loop {
        tokio::select! {
            // Private deliveries
            frame = rx.recv() => {
                let Some(frame) = frame else { break };
                if send_frame(&mut ws_tx, &frame).await.is_err() {
                    break;
                }
            }

            // Announcements
            event = announcements.recv() => {
                match event {
                    Ok(frame) => {
                        if send_frame(&mut ws_tx, &frame).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!("Connection {:?} lagged, skipped {} announcements", principal, n);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            // Client frames
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_text(&state, &principal, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!("Connection {:?} errored: {}", principal, e);
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    drop(tx);
    if let Some((user_id, connection_id)) = registration {
        state.registry.unregister(user_id, connection_id);
    }
    tracing::info!("Connection closed for {:?}", principal);
}

async fn send_frame(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    frame: &ServerFrame,
) -> Result<(), axum::Error> {
    let text = match frame.encode() {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to encode {} frame: {}", frame.destination(), e);
            return Ok(());
        }
    };
    ws_tx.send(Message::Text(text.into())).await
}
