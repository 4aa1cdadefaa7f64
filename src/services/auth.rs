//! Signup and signin
//!
//! # Performance
//!
//! Password hashing and verification run on the blocking thread pool.

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::PasswordService;
use crate::error::{ApiError, ApiResult};
use crate::store::{User, UserStore};

/// Authentication service over an injected user store
///
/// Holds no state of its own beyond the store handle. Session handling
/// belongs to the HTTP layer; this service only returns the user.
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new account
    ///
    /// Rejects emails that already have a user, hashes the password, and
    /// delegates creation to the store. The returned user carries the
    /// salted hash, never the plaintext.
    pub async fn signup(&self, email: &str, password: &str) -> ApiResult<User> {
        let existing = self
            .store
            .find_by_email(email)
            .await
            .map_err(ApiError::Internal)?;
        if !existing.is_empty() {
            return Err(ApiError::EmailTaken(email.to_string()));
        }

        debug!("Hashing password for new user");
        let password_hash = PasswordService::hash_async(password.to_string()).await?;

        let user = self
            .store
            .create(email, &password_hash)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Authenticate with email and password
    ///
    /// Looks the email up, verifies the password against the stored
    /// credential, and returns the matched user unchanged. Reads only.
    pub async fn signin(&self, email: &str, password: &str) -> ApiResult<User> {
        let matches = self
            .store
            .find_by_email(email)
            .await
            .map_err(ApiError::Internal)?;

        // The store may return several rows for one email; the first match
        // wins.
        let Some(user) = matches.into_iter().next() else {
            return Err(ApiError::UserNotFound);
        };

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        Ok(user)
    }
}
