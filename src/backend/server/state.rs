/**
 * Application State Management
 *
 * `AppState` is cheap to clone and shared by request handlers and
 * connection tasks. `FromRef` lets handlers extract just the part they need.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::backend::auth::tokens::TokenService;
use crate::backend::realtime::{AnnouncementBroadcast, ConnectionRegistry, HandshakeAuthenticator};
use crate::shared::config::{AppConfig, ConfigError};

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration
    pub config: Arc<AppConfig>,

    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Token service, the only holder of the signing key
    pub tokens: Arc<TokenService>,

    /// Resolves principals for new WebSocket connections
    pub handshake: HandshakeAuthenticator,

    /// Live connections keyed by user id
    pub registry: ConnectionRegistry,

    /// `/topic/notifications` channel
    pub announcements: AnnouncementBroadcast,
}

impl AppState {
    /// Assemble the state from a validated configuration and an open pool
    pub fn new(config: AppConfig, db_pool: SqlitePool) -> Result<Self, ConfigError> {
        let tokens = Arc::new(TokenService::new(&config.jwt_secret)?);
        let (announcements, _) = broadcast::channel(config.broadcast_capacity);

        Ok(Self {
            handshake: HandshakeAuthenticator::new(tokens.clone()),
            tokens,
            registry: ConnectionRegistry::new(),
            announcements,
            db_pool,
            config: Arc::new(config),
        })
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
