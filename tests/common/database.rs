//! Database test fixtures and utilities
//!
//! Every fixture gets its own in-memory SQLite database with migrations
//! applied, so tests are isolated without any cleanup.

use campus_chat::backend::auth::users::create_user;
use campus_chat::backend::auth::User;
use campus_chat::backend::server::config::connect_database;
use sqlx::SqlitePool;

/// Password every seeded user shares
pub const TEST_PASSWORD: &str = "password123";

/// Cheapest bcrypt cost, keeps seeding fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a migrated in-memory pool
pub async fn create_test_pool() -> SqlitePool {
    connect_database("sqlite::memory:")
        .await
        .expect("Failed to create test database pool")
}

/// Insert a user directly, bypassing the HTTP layer
pub async fn seed_user(pool: &SqlitePool, first_name: &str, surname: &str) -> User {
    let hash = bcrypt::hash(TEST_PASSWORD, TEST_BCRYPT_COST).expect("Failed to hash password");
    create_user(pool, first_name, surname, &hash)
        .await
        .expect("Failed to seed user")
}

/// Test database fixture
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a new test database fixture
    pub async fn new() -> Self {
        Self {
            pool: create_test_pool().await,
        }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Seed `count` users named `User<n> Test`
    pub async fn seed_users(&self, count: usize) -> Vec<User> {
        let mut users = Vec::with_capacity(count);
        for n in 0..count {
            users.push(seed_user(&self.pool, &format!("User{}", n), "Test").await);
        }
        users
    }
}
