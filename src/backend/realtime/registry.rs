//! Connection Registry
//!
//! Maps a user id to the outbound queues of that user's live connections.
//! One user may hold several connections at once (tabs, devices); each one
//! receives every private delivery. Handshake and disconnect race freely, so
//! the map is a `DashMap`.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use crate::shared::messaging::{ServerFrame, UserId};

/// Identifies one connection within the registry
pub type ConnectionId = Uuid;

#[derive(Debug, Clone)]
struct ConnectionHandle {
    id: ConnectionId,
    sender: mpsc::Sender<ServerFrame>,
}

/// Live connections keyed by user id
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<DashMap<UserId, Vec<ConnectionHandle>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound queue for a user
    pub fn register(&self, user_id: UserId, sender: mpsc::Sender<ServerFrame>) -> ConnectionId {
        let id = Uuid::new_v4();
        self.connections
            .entry(user_id)
            .or_default()
            .push(ConnectionHandle { id, sender });
        tracing::debug!("Registered connection {} for user {}", id, user_id);
        id
    }

    /// Remove one connection; the user's entry goes away with its last one
    pub fn unregister(&self, user_id: UserId, id: ConnectionId) {
        if let Entry::Occupied(mut entry) = self.connections.entry(user_id) {
            entry.get_mut().retain(|handle| handle.id != id);
            if entry.get().is_empty() {
                entry.remove();
            }
            tracing::debug!("Unregistered connection {} for user {}", id, user_id);
        }
    }

    /// Queue a frame on every connection of a user.
    ///
    /// Returns how many connections accepted it. Full or closed queues drop
    /// the frame; other connections are unaffected.
    pub fn send_to_user(&self, user_id: UserId, frame: &ServerFrame) -> usize {
        let Some(handles) = self.connections.get(&user_id) else {
            return 0;
        };

        let mut delivered = 0;
        for handle in handles.iter() {
            match handle.sender.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Outbound queue full for user {} connection {}, dropping {}",
                        user_id,
                        handle.id,
                        frame.destination()
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("Connection {} for user {} already closed", handle.id, user_id);
                }
            }
        }
        delivered
    }

    /// Number of live connections for a user
    pub fn connection_count(&self, user_id: UserId) -> usize {
        self.connections
            .get(&user_id)
            .map(|handles| handles.len())
            .unwrap_or(0)
    }

    /// Drop queues whose connection task has gone away.
    ///
    /// Returns how many were removed.
    pub fn prune_closed(&self) -> usize {
        let mut removed = 0;
        self.connections.retain(|_, handles| {
            let before = handles.len();
            handles.retain(|handle| !handle.sender.is_closed());
            removed += before - handles.len();
            !handles.is_empty()
        });
        removed
    }
}
