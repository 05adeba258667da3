//! HTTP client adapter: base path joining, header injection, and the
//! three-way error classification.
//!
//! # Design
//! `ApiClient` is the single place requests are built and responses
//! interpreted. Services hand it a relative path and a serializable body and
//! get back a typed value or an `ApiError` variant they can match on:
//! `Status` when the server answered non-2xx (carrying the body's `message`
//! field when present), `Network` when nothing came back, `Request` when the
//! request could not be built.
//!
//! A bearer token is attached whenever the session store holds one; the
//! adapter itself never writes to the store.

use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::session::SessionStore;

/// Issues requests against the configured base path.
#[derive(Clone)]
pub struct ApiClient {
    base_path: String,
    transport: Arc<dyn Transport>,
    store: SessionStore,
}

impl ApiClient {
    pub fn new(base_path: &str, transport: Arc<dyn Transport>, store: SessionStore) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            transport,
            store,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(HttpMethod::Get, path, None)
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.dispatch(HttpMethod::Post, path, Some(bytes))
    }

    pub fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.dispatch(HttpMethod::Put, path, Some(bytes))
    }

    fn dispatch<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        let req = self.build(method, path, body);
        debug!("{:?} {}", req.method, req.url);
        let response = self.transport.execute(&req)?;
        interpret(response)
    }

    fn build(&self, method: HttpMethod, path: &str, body: Option<Vec<u8>>) -> HttpRequest {
        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.store.bearer_token() {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            url: format!("{}{}", self.base_path, path),
            headers,
            body,
        }
    }
}

/// Maps a raw response onto the success type or the classified error.
fn interpret<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            message: extract_message(&response.body),
        });
    }
    let value: Value = if response.body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?
    };
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The server-supplied `message` field of an error body, if the body is JSON
/// and carries one.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use crate::storage::MemoryStorage;
    use crate::test_support::ScriptedTransport;
    use serde_json::json;

    fn fixture(transport: Arc<ScriptedTransport>) -> (ApiClient, SessionStore) {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let api = ApiClient::new("http://localhost:4010/api/v1/", transport, store.clone());
        (api, store)
    }

    #[test]
    fn joins_base_path_and_strips_trailing_slash() {
        let transport = ScriptedTransport::new();
        transport.reply(200, "[]");
        let (api, _) = fixture(transport.clone());

        let _: Vec<Value> = api.get("/cars").unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].url, "http://localhost:4010/api/v1/cars");
        assert_eq!(seen[0].method, HttpMethod::Get);
    }

    #[test]
    fn attaches_bearer_token_when_present() {
        let transport = ScriptedTransport::new();
        transport.reply(200, "{}");
        let (api, store) = fixture(transport.clone());
        store.set_session(&json!({"id": 1}), "abc123", Role::User);

        let _: Value = api.get("/cars").unwrap();

        let headers = &transport.seen()[0].headers;
        assert!(headers.contains(&(
            "authorization".to_string(),
            "Bearer abc123".to_string()
        )));
    }

    #[test]
    fn no_authorization_header_without_token() {
        let transport = ScriptedTransport::new();
        transport.reply(200, "{}");
        let (api, _) = fixture(transport.clone());

        let _: Value = api.get("/cars").unwrap();

        let headers = &transport.seen()[0].headers;
        assert!(headers.iter().all(|(name, _)| name != "authorization"));
    }

    #[test]
    fn post_sets_content_type_and_serializes_body() {
        let transport = ScriptedTransport::new();
        transport.reply(201, r#"{"id": 2}"#);
        let (api, _) = fixture(transport.clone());

        let created: Value = api.post("/cars", &json!({"brand": "Ford"})).unwrap();
        assert_eq!(created["id"], 2);

        let seen = transport.seen();
        assert!(seen[0]
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        let body: Value = serde_json::from_slice(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["brand"], "Ford");
    }

    #[test]
    fn non_2xx_with_message_becomes_status_error() {
        let transport = ScriptedTransport::new();
        transport.reply(400, r#"{"message": "Bad request"}"#);
        let (api, _) = fixture(transport);

        let err = api.get::<Value>("/cars").unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Bad request"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn non_2xx_without_body_has_no_message() {
        let transport = ScriptedTransport::new();
        transport.reply(500, "");
        let (api, _) = fixture(transport);

        let err = api.get::<Value>("/cars").unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, None);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn network_failure_passes_through() {
        let transport = ScriptedTransport::new();
        transport.fail_network("connection refused");
        let (api, _) = fixture(transport);

        let err = api.get::<Value>("/cars").unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let transport = ScriptedTransport::new();
        transport.reply(200, "not json");
        let (api, _) = fixture(transport);

        let err = api.get::<Value>("/cars").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn empty_success_body_decodes_as_null() {
        let transport = ScriptedTransport::new();
        transport.reply(204, "");
        let (api, _) = fixture(transport);

        let value: Value = api.get("/ping").unwrap();
        assert!(value.is_null());
    }
}
