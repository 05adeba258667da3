//! Acting-user lookup with cached-session fallback.
//!
//! # Design
//! `current_user` is an identity-sensitive read: it refuses to run without a
//! session, but once one exists it degrades gracefully — a failing live fetch
//! returns the cached session's fields instead of an error, because stale
//! profile data still renders a usable account page.

use log::warn;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::types::{Session, User};

pub struct UserService {
    api: ApiClient,
    store: SessionStore,
}

impl UserService {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// The acting user's record: live from the backend when reachable, the
    /// cached session projection otherwise. `NoSession` without a session.
    pub fn current_user(&self) -> Result<User, ApiError> {
        let session = self.store.session().ok_or(ApiError::NoSession)?;
        match self.api.get(&format!("/users/{}", session.user_id)) {
            Ok(user) => Ok(user),
            Err(err) => {
                warn!("live user fetch failed, serving cached session: {err}");
                Ok(session_as_user(&session))
            }
        }
    }

    /// Ends the current session. Idempotent; never fails. The `currentUser`
    /// cache is left in place.
    pub fn logout(&self) {
        self.store.end_session();
    }
}

/// Projects a cached session into a `User`, empty strings where the session
/// has nothing cached.
fn session_as_user(session: &Session) -> User {
    User {
        id: session.user_id.to_string(),
        name: session.name.clone().unwrap_or_default(),
        email: session.email.clone().unwrap_or_default(),
        ..User::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use crate::storage::MemoryStorage;
    use crate::test_support::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn fixture(transport: Arc<ScriptedTransport>) -> (UserService, SessionStore) {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let api = ApiClient::new("http://localhost:4010", transport, store.clone());
        (UserService::new(api, store.clone()), store)
    }

    #[test]
    fn returns_live_record_when_fetch_succeeds() {
        let transport = ScriptedTransport::new();
        transport.reply(200, r#"{"id":42,"name":"X","email":"x@x.com"}"#);
        let (service, store) = fixture(transport.clone());
        store.set_session(&json!({"id": 42}), "t", Role::User);

        let user = service.current_user().unwrap();

        assert_eq!(user.id, "42");
        assert_eq!(user.name, "X");
        assert_eq!(transport.seen()[0].url, "http://localhost:4010/users/42");
    }

    #[test]
    fn no_session_is_a_precondition_error() {
        let transport = ScriptedTransport::new();
        let (service, _) = fixture(transport.clone());

        let err = service.current_user().unwrap_err();

        assert!(matches!(err, ApiError::NoSession));
        assert_eq!(err.to_string(), "No active session found");
        // The precondition fails before any request goes out.
        assert!(transport.seen().is_empty());
    }

    #[test]
    fn failing_fetch_falls_back_to_cached_session() {
        let transport = ScriptedTransport::new();
        transport.reply(500, "");
        let (service, store) = fixture(transport);
        store.set_session(&json!({"id": 3, "name": "S"}), "t", Role::User);

        let user = service.current_user().unwrap();

        assert_eq!(user.id, "3");
        assert_eq!(user.name, "S");
        assert_eq!(user.email, "");
        assert_eq!(user.plan, "");
    }

    #[test]
    fn logout_clears_session_and_is_idempotent() {
        let transport = ScriptedTransport::new();
        let (service, store) = fixture(transport);
        store.set_session(&json!({"id": 100, "name": "N"}), "t", Role::User);

        service.logout();
        assert!(store.session().is_none());
        assert!(!store.is_authenticated(Role::User));
        // Stale-but-available display data survives the logout.
        assert!(store.cached_user(Role::User).is_some());

        service.logout();
        assert!(store.session().is_none());
    }
}
