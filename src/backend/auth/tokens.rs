/**
 * Token Service
 *
 * Issues and verifies the signed identity tokens used by both the HTTP
 * surface and the connection handshake. The service is the only holder of
 * the signing key; it is built once at startup from `AppConfig` and shared
 * through `AppState`.
 *
 * # Token Kinds
 *
 * - Access token: `sub`, `iat`, `exp` (30 minutes) plus display claims
 *   `firstName`, `surname`, `status`, `role`
 * - Refresh token: `sub`, `iat`, `exp` (4 days)
 *
 * Both are HS256 and verified with 30 seconds of clock skew.
 */

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::backend::error::TokenError;
use crate::shared::config::{check_secret, ConfigError};
use crate::shared::messaging::UserId;

/// Access token lifetime
pub const ACCESS_TOKEN_TTL_SECS: i64 = 30 * 60;

/// Refresh token lifetime
pub const REFRESH_TOKEN_TTL_SECS: i64 = 4 * 24 * 60 * 60;

/// Tolerated difference between issuer and verifier clocks
pub const CLOCK_SKEW_SECS: i64 = 30;

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration time (Unix seconds)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Vec<String>>,
}

/// Issues and verifies identity tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Clock,
}

// Key material never reaches the logs.
impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"<redacted>")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}

impl TokenService {
    /// Derive the signing key from the configured secret.
    ///
    /// A secret shorter than `MIN_SECRET_LENGTH` is a configuration error.
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        check_secret(secret)?;

        // Expiry is checked against the injected clock, not jsonwebtoken's.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock: Arc::new(Utc::now),
        })
    }

    /// Replace the clock (tests pin time with this)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> i64 {
        (self.clock)().timestamp()
    }

    /// Issue a short-lived access token carrying the user's display claims
    pub fn issue_access_token(&self, user: &User) -> Result<String, TokenError> {
        let now = self.now();
        let claims = Claims {
            sub: user.id.to_string(),
            iat: now,
            exp: now + ACCESS_TOKEN_TTL_SECS,
            first_name: Some(user.first_name.clone()),
            surname: Some(user.surname.clone()),
            status: Some(user.status.clone()),
            role: Some(user.role_names()),
        };
        self.sign(&claims)
    }

    /// Issue a long-lived refresh token carrying only the subject
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        let now = self.now();
        let claims = Claims {
            sub: user.id.to_string(),
            iat: now,
            exp: now + REFRESH_TOKEN_TTL_SECS,
            first_name: None,
            surname: None,
            status: None,
            role: None,
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify signature and expiry and return the claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            TokenError::Invalid
        })?;

        if self.now() > data.claims.exp + CLOCK_SKEW_SECS {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Verify a token and return its subject
    pub fn extract_subject(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = self.decode_claims(token)?;
        claims.sub.parse::<UserId>().map_err(|_| {
            tracing::debug!("Token subject is not a user id: {:?}", claims.sub);
            TokenError::Invalid
        })
    }

    /// True iff the token verifies and names `expected` as its subject
    pub fn is_valid(&self, token: &str, expected: UserId) -> bool {
        matches!(self.extract_subject(token), Ok(subject) if subject == expected)
    }
}
