/**
 * Server Configuration
 *
 * Loads `AppConfig` from its sources and opens the database.
 *
 * # Configuration Sources
 *
 * Lowest to highest precedence:
 * 1. Built-in defaults
 * 2. TOML file named by `CAMPUS_CHAT_CONFIG`, if set
 * 3. Environment variables (`JWT_SECRET`, `DATABASE_URL`, `BIND_ADDR`,
 *    `MAX_MESSAGE_LENGTH`), after loading `.env`
 *
 * # Error Handling
 *
 * Configuration and database errors are fatal:
 * the binary logs them and exits before binding.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Environment variable naming the optional TOML file
pub const CONFIG_PATH_ENV: &str = "CAMPUS_CHAT_CONFIG";

/// Load the configuration from file and environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();

    let builder = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            tracing::info!("Reading configuration from {}", path);
            let source = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            AppConfigBuilder::from_toml_str(&source)?
        }
        Err(_) => AppConfigBuilder::default(),
    };

    builder.merge_env(|key| std::env::var(key).ok())?.build()
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Open the SQLite pool and run migrations
///
/// An in-memory database lives only as long as its connection, so it gets a
/// single connection that is never recycled.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    tracing::info!("Connecting to database...");
    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}
