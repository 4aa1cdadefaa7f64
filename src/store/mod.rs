//! User storage
//!
//! The service consumes storage only through the [`UserStore`] trait, so
//! any conforming implementation is interchangeable: Postgres in
//! production, an in-memory store in tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

/// A registered user account
///
/// `password_hash` is always the encoded `salt.digest` pair produced by
/// [`crate::auth::PasswordService`]; plaintext passwords are never stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage capability consumed by the auth and lookup services
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users whose email matches, in unspecified order.
    ///
    /// The contract does not promise uniqueness; callers that need a single
    /// user take the first match.
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>>;

    /// The user with the given id, if any.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Persist a new user and return it with its assigned id.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User>;
}
