//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Constructor injection**: the user store is supplied at startup and
//!    everything that needs it receives a handle, no globals
//! 2. **Cheap cloning**: all fields are Arc-backed
//! 3. **Immutable after creation**: only the session map mutates

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{AuthService, UserService};
use crate::session::SessionStore;
use crate::store::UserStore;

/// Shared application state
///
/// Holds the injected user store, the session map, and the services built
/// over the store. Cloning is O(1) Arc increments.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn UserStore>,
    sessions: SessionStore,
    config: Arc<AppConfig>,
    auth: Arc<AuthService>,
    users: Arc<UserService>,
}

impl AppState {
    /// Create the application state over any conforming user store.
    pub fn new(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        let auth = Arc::new(AuthService::new(store.clone()));
        let users = Arc::new(UserService::new(store.clone()));

        Self {
            store,
            sessions: SessionStore::new(),
            config: Arc::new(config),
            auth,
            users,
        }
    }

    #[inline]
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[inline]
    pub fn users(&self) -> &UserService {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryUserStore;

    #[tokio::test]
    async fn test_state_clone_shares_the_store() {
        let state = AppState::new(Arc::new(InMemoryUserStore::new()), AppConfig::default());
        let cloned = state.clone();

        // A user created through one handle is visible through the other
        let user = state.auth().signup("a@example.com", "pw").await.unwrap();
        let found = cloned.users().find_by_id(user.id).await.unwrap();
        assert_eq!(found.email, "a@example.com");
    }
}
