//! Application configuration module
//!
//! Provides the process-wide configuration object. It is built once at
//! startup (defaults, then an optional TOML file, then environment variables)
//! and handed by reference to everything that needs it. A configuration that
//! fails validation is fatal: the server must not start.

use std::fmt;
use std::net::SocketAddr;

use serde::Deserialize;
use thiserror::Error;

/// Minimum signing secret length in bytes (HS256 key material)
pub const MIN_SECRET_LENGTH: usize = 32;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://campus_chat.db";

/// Default upper bound for message content, in characters
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 2000;

/// Default number of frames buffered per live connection
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 64;

/// Default capacity of the announcement broadcast channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Secret the token signing key is derived from
    pub jwt_secret: String,
    /// sqlx connection URL
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Maximum message content length, in characters
    pub max_message_length: usize,
    /// Frames buffered per connection before deliveries are dropped
    pub outbound_queue_capacity: usize,
    /// Capacity of the `/topic/notifications` broadcast channel
    pub broadcast_capacity: usize,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

// The secret never reaches the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("max_message_length", &self.max_message_length)
            .field("outbound_queue_capacity", &self.outbound_queue_capacity)
            .field("broadcast_capacity", &self.broadcast_capacity)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_secret(&self.jwt_secret)?;
        if self.max_message_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_message_length",
                value: "0".to_string(),
            });
        }
        if self.outbound_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "outbound_queue_capacity",
                value: "0".to_string(),
            });
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "broadcast_capacity",
                value: "0".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "bcrypt_cost",
                value: self.bcrypt_cost.to_string(),
            });
        }
        Ok(())
    }
}

/// Reject secrets that are missing or too short to key HS256.
pub fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::SecretTooShort {
            min: MIN_SECRET_LENGTH,
            actual: secret.len(),
        });
    }
    Ok(())
}

/// Builder for AppConfig
///
/// Also the shape of the optional TOML configuration file, so every field is
/// optional and later sources override earlier ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    database_url: Option<String>,
    bind_addr: Option<String>,
    max_message_length: Option<usize>,
    outbound_queue_capacity: Option<usize>,
    broadcast_capacity: Option<usize>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    /// Parse a TOML document into a builder
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Set the signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listen address
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = Some(addr.into());
        self
    }

    /// Set the maximum message length
    pub fn max_message_length(mut self, len: usize) -> Self {
        self.max_message_length = Some(len);
        self
    }

    /// Set the per-connection outbound queue capacity
    pub fn outbound_queue_capacity(mut self, capacity: usize) -> Self {
        self.outbound_queue_capacity = Some(capacity);
        self
    }

    /// Set the announcement broadcast capacity
    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = Some(capacity);
        self
    }

    /// Set the bcrypt cost
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Overlay values from the environment.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production; tests pass a map.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = Some(secret);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = Some(addr);
        }
        if let Some(raw) = lookup("MAX_MESSAGE_LENGTH") {
            let len = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "MAX_MESSAGE_LENGTH",
                value: raw.clone(),
            })?;
            self.max_message_length = Some(len);
        }
        Ok(self)
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self.jwt_secret.ok_or(ConfigError::MissingValue("jwt_secret"))?;

        let raw_addr = self.bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::InvalidValue {
            key: "bind_addr",
            value: raw_addr.clone(),
        })?;

        let config = AppConfig {
            jwt_secret,
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
            max_message_length: self.max_message_length.unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH),
            outbound_queue_capacity: self
                .outbound_queue_capacity
                .unwrap_or(DEFAULT_OUTBOUND_QUEUE_CAPACITY),
            broadcast_capacity: self.broadcast_capacity.unwrap_or(DEFAULT_BROADCAST_CAPACITY),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT secret must be at least {min} bytes long (got {actual})")]
    SecretTooShort { min: usize, actual: usize },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
