/**
 * Announcement Broadcasting
 *
 * `/topic/notifications` is the only channel every connection receives,
 * authenticated or not. It uses `tokio::sync::broadcast`; a slow
 * connection that lags behind skips the missed announcements.
 */

use tokio::sync::broadcast;

use crate::shared::messaging::ServerFrame;

/// Sender half of the announcement channel
pub type AnnouncementBroadcast = broadcast::Sender<ServerFrame>;

/// Broadcast an announcement to every open connection
///
/// Returns the number of connections that will receive it (0 if none).
pub fn broadcast_announcement(broadcast_tx: &AnnouncementBroadcast, text: String) -> usize {
    match broadcast_tx.send(ServerFrame::Announcement(text)) {
        Ok(subscriber_count) => {
            tracing::info!("[Realtime] Announcement sent to {} connections", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Realtime] No connections to receive announcement");
            0
        }
    }
}
