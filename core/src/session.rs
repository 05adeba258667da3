//! Session and token persistence over the storage port.
//!
//! # Design
//! Two role namespaces share one store: regular users live under
//! `authToken`/`currentUser`, administrators under `adminToken`/`adminUser`.
//! A token and its session record are always written and cleared together
//! within a namespace, and the namespaces never touch each other's keys.
//!
//! `currentSession` is the acting-user record both roles share; the
//! `currentUser` cache has its own lifecycle and survives flows that only
//! clear the session (stale-but-available fallback data).

use std::sync::Arc;

use log::warn;
use serde_json::Value;

use crate::storage::Storage;
use crate::types::{Session, User};

const KEY_AUTH_TOKEN: &str = "authToken";
const KEY_ADMIN_TOKEN: &str = "adminToken";
const KEY_CURRENT_USER: &str = "currentUser";
const KEY_ADMIN_USER: &str = "adminUser";
const KEY_CURRENT_SESSION: &str = "currentSession";
const KEY_USERS: &str = "users";

/// Which credential namespace an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    fn token_key(self) -> &'static str {
        match self {
            Role::User => KEY_AUTH_TOKEN,
            Role::Admin => KEY_ADMIN_TOKEN,
        }
    }

    fn user_key(self) -> &'static str {
        match self {
            Role::User => KEY_CURRENT_USER,
            Role::Admin => KEY_ADMIN_USER,
        }
    }
}

/// Cheap-clone handle over the shared storage port.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persists a login: token, the role's user record, and `currentSession`
    /// derived from the payload's `id`/`name`/`email` fields.
    pub fn set_session(&self, user_payload: &Value, token: &str, role: Role) {
        self.storage.set(role.token_key(), token);
        self.storage.set(role.user_key(), &user_payload.to_string());

        let session = Session {
            user_id: scalar_as_i64(user_payload.get("id")).unwrap_or(0),
            name: user_payload
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string),
            email: user_payload
                .get("email")
                .and_then(Value::as_str)
                .map(str::to_string),
        };
        match serde_json::to_string(&session) {
            Ok(raw) => self.storage.set(KEY_CURRENT_SESSION, &raw),
            Err(e) => warn!("failed to serialize session record: {e}"),
        }
    }

    /// The current acting-user record, if one is stored and parseable.
    pub fn session(&self) -> Option<Session> {
        let raw = self.storage.get(KEY_CURRENT_SESSION)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("discarding unreadable session record: {e}");
                None
            }
        }
    }

    /// Clears the role's token and user record along with `currentSession`.
    /// Clearing an already-empty namespace is a no-op.
    pub fn clear_session(&self, role: Role) {
        self.storage.remove(role.token_key());
        self.storage.remove(role.user_key());
        self.storage.remove(KEY_CURRENT_SESSION);
    }

    /// Ends the user-role session: removes `currentSession` and the user
    /// token together, leaving the `currentUser` cache behind for fallback
    /// display.
    pub fn end_session(&self) {
        self.storage.remove(KEY_AUTH_TOKEN);
        self.storage.remove(KEY_CURRENT_SESSION);
    }

    /// The raw cached user record for the role, if one is stored.
    pub fn cached_user(&self, role: Role) -> Option<Value> {
        let raw = self.storage.get(role.user_key())?;
        serde_json::from_str(&raw).ok()
    }

    /// True iff a non-empty token is stored for the role.
    pub fn is_authenticated(&self, role: Role) -> bool {
        self.token(role).is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self, role: Role) -> Option<String> {
        self.storage.get(role.token_key())
    }

    /// Token attached to outgoing requests: the user token when present,
    /// otherwise the admin token.
    pub fn bearer_token(&self) -> Option<String> {
        self.token(Role::User)
            .filter(|t| !t.is_empty())
            .or_else(|| self.token(Role::Admin).filter(|t| !t.is_empty()))
    }

    /// The locally cached registration list under the `users` key.
    pub fn cached_users(&self) -> Vec<User> {
        let Some(raw) = self.storage.get(KEY_USERS) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(users) => users,
            Err(e) => {
                warn!("discarding unreadable cached user list: {e}");
                Vec::new()
            }
        }
    }

    /// Appends one record to the cached registration list.
    pub fn push_cached_user(&self, user: &User) {
        let mut users = self.cached_users();
        users.push(user.clone());
        match serde_json::to_string(&users) {
            Ok(raw) => self.storage.set(KEY_USERS, &raw),
            Err(e) => warn!("failed to serialize cached user list: {e}"),
        }
    }
}

fn scalar_as_i64(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}
