//! In-memory user store
//!
//! Conforms to [`UserStore`] without any external dependency. Used by the
//! test suite and suitable for local experiments. Does not enforce email
//! uniqueness; the signup pre-check is the only guard, as with any store.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{User, UserStore};

/// User store holding records in process memory
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|user| user.email == email)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.users.write().await.push(user.clone());
        Ok(user)
    }
}
