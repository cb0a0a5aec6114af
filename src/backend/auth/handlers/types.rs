/**
 * Authentication Handler Types
 *
 * Request and response bodies of the authentication endpoints. Field names
 * are camelCase on the wire.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::shared::messaging::UserId;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub surname: String,
    /// Plain password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub first_name: String,
    pub surname: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Refresh request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub surname: String,
    pub status: String,
    pub roles: Vec<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            surname: user.surname.clone(),
            status: user.status.clone(),
            roles: user.role_names(),
        }
    }
}
