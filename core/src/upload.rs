//! Image upload to the third-party host.
//!
//! # Design
//! The host is independent of the backend: uploads bypass the `ApiClient`
//! (no base path, no bearer token) and talk to the transport directly with a
//! hand-built `multipart/form-data` body. The API key rides in the query
//! string, as the host requires. No retry.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::Environment;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::types::UploadedImage;

#[derive(serde::Deserialize)]
struct UploadResponse {
    data: UploadedImage,
}

pub struct ImageUploadService {
    endpoint: String,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl ImageUploadService {
    pub fn new(env: &Environment, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: env.image_api_base.clone(),
            api_key: env.image_api_key.clone(),
            transport,
        }
    }

    /// Uploads one image and returns the host's `data` payload. A non-2xx
    /// answer raises the user-facing upload message.
    pub fn upload(&self, bytes: &[u8], filename: &str) -> Result<UploadedImage, ApiError> {
        let boundary = format!("certiweb-{}", Uuid::new_v4().simple());
        let req = HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}?key={}", self.endpoint, self.api_key),
            headers: vec![(
                "content-type".to_string(),
                format!("multipart/form-data; boundary={boundary}"),
            )],
            body: Some(multipart_body(&boundary, "image", filename, bytes)),
        };

        let response = self.transport.execute(&req)?;
        if !response.is_success() {
            return Err(ApiError::Upload(format!("HTTP {}", response.status)));
        }
        let parsed: UploadResponse =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(parsed.data)
    }
}

/// Single-part `multipart/form-data` body carrying the image bytes.
fn multipart_body(boundary: &str, name: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             content-disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
             content-type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedTransport;

    fn service(transport: Arc<ScriptedTransport>) -> ImageUploadService {
        let env = Environment {
            server_base_path: "http://localhost:4010".to_string(),
            image_api_base: "http://localhost:4010/upload".to_string(),
            image_api_key: "test-key".to_string(),
        };
        ImageUploadService::new(&env, transport)
    }

    #[test]
    fn upload_returns_nested_data_payload() {
        let transport = ScriptedTransport::new();
        transport.reply(200, r#"{"data":{"url":"http://a","display_url":"http://b"}}"#);
        let service = service(transport.clone());

        let image = service.upload(b"x", "car.png").unwrap();

        assert_eq!(image.url, "http://a");
        assert_eq!(image.display_url, "http://b");
        let seen = transport.seen();
        assert_eq!(seen[0].url, "http://localhost:4010/upload?key=test-key");
        assert_eq!(seen[0].method, HttpMethod::Post);
    }

    #[test]
    fn upload_failure_raises_user_facing_message() {
        let transport = ScriptedTransport::new();
        transport.reply(503, "");
        let err = service(transport).upload(b"x", "car.png").unwrap_err();
        assert!(err.to_string().starts_with("Error al subir imagen"));
    }

    #[test]
    fn multipart_body_wraps_bytes_in_one_part() {
        let body = multipart_body("b123", "image", "car.png", b"PNGDATA");
        let text = String::from_utf8_lossy(&body);
        assert!(text.starts_with("--b123\r\n"));
        assert!(text.contains("name=\"image\""));
        assert!(text.contains("filename=\"car.png\""));
        assert!(text.contains("PNGDATA"));
        assert!(text.ends_with("--b123--\r\n"));
    }

    #[test]
    fn request_carries_multipart_content_type() {
        let transport = ScriptedTransport::new();
        transport.reply(200, r#"{"data":{"url":"http://a"}}"#);
        let service = service(transport.clone());
        service.upload(b"x", "car.png").unwrap();

        let headers = &transport.seen()[0].headers;
        let content_type = headers
            .iter()
            .find(|(name, _)| name == "content-type")
            .map(|(_, value)| value.clone())
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary=certiweb-"));
    }
}
