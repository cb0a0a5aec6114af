/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Open the database and run migrations
 * 2. Build `AppState` (token service, registry, announcement channel)
 * 3. Create the router
 * 4. Start the periodic registry sweep
 */

use std::time::Duration;

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::connect_database;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// How often closed connection queues are pruned
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Open the database and assemble the application state
pub async fn build_state(config: AppConfig) -> Result<AppState, BackendError> {
    let db_pool = connect_database(&config.database_url).await?;
    let state = AppState::new(config, db_pool)?;
    tracing::info!("Application state initialized");
    Ok(state)
}

/// Create and configure the Axum application
///
/// Must be called inside a Tokio runtime; it spawns the registry sweep.
pub fn create_app(app_state: AppState) -> Router<()> {
    tracing::info!("Initializing campus chat server");

    let app = create_router(app_state.clone());

    let registry = app_state.registry.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let removed = registry.prune_closed();
            if removed > 0 {
                tracing::debug!("Pruned {} closed connections", removed);
            }
        }
    });

    tracing::info!("Router configured with periodic cleanup task");
    app
}
