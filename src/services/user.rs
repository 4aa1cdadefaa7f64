//! User lookup

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::store::{User, UserStore};

/// Read-only lookup service over the user store
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Find a single user by id, failing when absent.
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<User> {
        self.store
            .find_by_id(id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::UserNotFound)
    }

    /// All users registered under the given email.
    pub async fn find_by_email(&self, email: &str) -> ApiResult<Vec<User>> {
        self.store
            .find_by_email(email)
            .await
            .map_err(ApiError::Internal)
    }
}
