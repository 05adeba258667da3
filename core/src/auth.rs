//! Login, registration and logout against the auth endpoints.
//!
//! # Design
//! Backend rejection of credentials is an `AuthOutcome::Rejected`, never an
//! `Err` — login forms branch on the outcome and show the message. Only
//! transport and configuration failures propagate as `ApiError`, because the
//! caller genuinely cannot continue then.
//!
//! Success is structural: any 2xx payload carrying a non-empty `token` field.
//! Nothing is persisted on any other path.

use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::session::{Role, SessionStore};
use crate::types::{AuthOutcome, User};

pub struct AuthService {
    api: ApiClient,
    store: SessionStore,
}

impl AuthService {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Authenticates a regular user. On success the token and session land in
    /// the user namespace.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        let body = json!({ "email": email, "password": password });
        self.attempt("/auth/login", &body, Role::User)
    }

    /// Authenticates an administrator against the admin endpoint. The payload
    /// must carry `role: "admin"`; tokens land in the admin namespace.
    pub fn login_admin(&self, username: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        let body = json!({ "username": username, "password": password });
        self.attempt("/admin_user/login", &body, Role::Admin)
    }

    /// Creates an account. A token-bearing response signs the new user in
    /// immediately, same contract as `login`.
    pub fn register(&self, user: &User) -> Result<AuthOutcome, ApiError> {
        let body = serde_json::to_value(user).map_err(|e| ApiError::Request(e.to_string()))?;
        self.attempt("/auth", &body, Role::User)
    }

    /// Clears both credential namespaces and the current session. Idempotent;
    /// clearing empty storage is a no-op.
    pub fn logout(&self) {
        self.store.clear_session(Role::User);
        self.store.clear_session(Role::Admin);
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated(Role::User)
    }

    fn attempt(&self, path: &str, body: &Value, role: Role) -> Result<AuthOutcome, ApiError> {
        match self.api.post::<Value, Value>(path, body) {
            Ok(payload) => {
                let token = payload
                    .get("token")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if token.is_empty() {
                    return Ok(AuthOutcome::Rejected {
                        message: payload_message(&payload)
                            .unwrap_or_else(|| "Login failed".to_string()),
                    });
                }
                if role == Role::Admin
                    && payload.get("role").and_then(Value::as_str) != Some("admin")
                {
                    return Ok(AuthOutcome::Rejected {
                        message: "Not an administrator".to_string(),
                    });
                }
                self.store.set_session(&payload, token, role);
                Ok(AuthOutcome::Authenticated {
                    user: payload,
                    is_admin: role == Role::Admin,
                })
            }
            Err(ApiError::Status { status, message }) => Ok(AuthOutcome::Rejected {
                message: message.unwrap_or_else(|| format!("HTTP {status}")),
            }),
            Err(other) => Err(other),
        }
    }
}

fn payload_message(payload: &Value) -> Option<String> {
    payload.get("message")?.as_str().map(str::to_string)
}
