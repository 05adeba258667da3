//! Domain DTOs for the CertiWeb API.
//!
//! # Design
//! The backend is loose about scalar types: ids arrive as numbers on some
//! endpoints and strings on others, and older records carry numeric prices.
//! Every field with that history deserializes through `lossy_string`, which
//! coerces numbers to their decimal form and `null` to the empty string.
//! Coercion happens once, at the wire boundary, so comparisons further up
//! (the history filter in particular) are plain string equality.
//!
//! Defaulted instances carry empty strings in every field — never `None`
//! sentinels — which is a contract the UI relies on for form binding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializes a JSON scalar of any type into its canonical string form.
///
/// `1` and `"1"` both become `"1"`; `null` becomes `""`. Non-scalar values
/// fall back to their compact JSON rendering rather than erroring, keeping
/// list endpoints tolerant of malformed records.
pub fn lossy_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_to_string(&value))
}

/// Canonical string form of a JSON value. The coercion behind the
/// loose-equality id matching.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// A registered user. `User::default()` yields the all-empty-string instance
/// used to back registration forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lossy_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub plan: String,
}

/// The client-held record identifying the acting user, persisted as the
/// `currentSession` storage entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An inspection reservation. `Reservation::default()` yields the
/// all-empty-string instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default, deserialize_with = "lossy_string")]
    pub id: String,
    #[serde(default)]
    pub reservation_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub inspection_date_time: String,
    #[serde(default, deserialize_with = "lossy_string")]
    pub price: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lossy_string")]
    pub user_id: String,
}

/// A car record. The backend owns its schema; anything beyond the known
/// fields rides along in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(default, deserialize_with = "lossy_string")]
    pub id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lossy_string")]
    pub price: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Result of a login or registration attempt.
///
/// Rejection by the backend (bad credentials, duplicate email) is an outcome,
/// not an error — only transport and configuration failures surface as
/// `ApiError` from the auth service.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Credentials accepted: the session and token are persisted and `user`
    /// holds the server payload.
    Authenticated { user: Value, is_admin: bool },
    /// Credentials not accepted; nothing was persisted.
    Rejected { message: String },
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated { .. })
    }
}

/// The `data` payload returned by the image host on a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub display_url: String,
    #[serde(default)]
    pub delete_url: String,
}
