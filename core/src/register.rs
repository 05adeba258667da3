//! Direct user-directory registration.
//!
//! Unlike `AuthService::register`, this path creates the account without
//! signing anyone in, and follows write-path error policy: failures raise.
//! Created records are appended to the locally cached registration list.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::types::User;

pub struct RegisterService {
    api: ApiClient,
    store: SessionStore,
}

impl RegisterService {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Creates a user record and caches it locally. Returns the created
    /// record; raises on any failure.
    pub fn register_user(&self, user: &User) -> Result<User, ApiError> {
        let created: User = self.api.post("/users", user)?;
        self.store.push_cached_user(&created);
        Ok(created)
    }
}
