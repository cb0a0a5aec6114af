/**
 * User Model and Database Operations
 *
 * Users are identified by a numeric id (the token subject) and log in with
 * their first name, surname and password. Name lookups are case-insensitive.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::backend::chat::db::timestamp_from_millis;
use crate::shared::messaging::UserId;

/// Status assigned at registration
pub const DEFAULT_STATUS: &str = "ACTIVE";

/// Roles assigned at registration
pub const DEFAULT_ROLES: &str = "USER";

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: UserId,
    pub first_name: String,
    pub surname: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Registration status (ACTIVE, PENDING, ...)
    pub status: String,
    /// Comma-separated role names
    pub roles: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role names as a list
    pub fn role_names(&self) -> Vec<String> {
        self.roles
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        first_name: row.get("first_name"),
        surname: row.get("surname"),
        password_hash: row.get("password_hash"),
        status: row.get("status"),
        roles: row.get("roles"),
        created_at: timestamp_from_millis(row.get("created_at")),
    }
}

/// Create a new user
pub async fn create_user(
    pool: &SqlitePool,
    first_name: &str,
    surname: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query(
        r#"
        INSERT INTO users (first_name, surname, password_hash, status, roles, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id, first_name, surname, password_hash, status, roles, created_at
        "#,
    )
    .bind(first_name)
    .bind(surname)
    .bind(password_hash)
    .bind(DEFAULT_STATUS)
    .bind(DEFAULT_ROLES)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user_from_row(&row))
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, first_name, surname, password_hash, status, roles, created_at
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(user_from_row))
}

/// Get user by first name and surname (case-insensitive)
pub async fn get_user_by_name(
    pool: &SqlitePool,
    first_name: &str,
    surname: &str,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, first_name, surname, password_hash, status, roles, created_at
        FROM users
        WHERE first_name = ?1 AND surname = ?2
        "#,
    )
    .bind(first_name)
    .bind(surname)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(user_from_row))
}

/// Check whether a user id exists
pub async fn user_exists(pool: &SqlitePool, id: UserId) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1) AS present")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(row.get::<i64, _>("present") != 0)
}

/// True if the error is a uniqueness violation (duplicate registration)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
