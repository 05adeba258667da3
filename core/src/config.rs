//! Environment configuration with hardcoded fallback defaults.
//!
//! The deployed frontend injected these at build time; here they resolve once
//! at startup from process environment variables, falling back to the same
//! defaults the original shipped with.

use std::env;

/// Default backend base path, including the API version prefix.
pub const DEFAULT_SERVER_BASE_PATH: &str = "https://certiweb-backend.onrender.com/api/v1";

/// Default upload endpoint of the third-party image host.
pub const DEFAULT_IMAGE_API_BASE: &str = "https://api.imgbb.com/1/upload";

const DEFAULT_IMAGE_API_KEY: &str = "2d6a3e0c9b51f48a7e90c1d24b83f657";

/// Resolved configuration for one client instance.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Base path every relative API path is joined onto.
    pub server_base_path: String,
    /// Upload endpoint of the image host.
    pub image_api_base: String,
    /// API key passed to the image host as a query parameter.
    pub image_api_key: String,
}

impl Environment {
    /// Reads `CERTIWEB_SERVER_BASE_PATH`, `CERTIWEB_IMAGE_API_BASE` and
    /// `CERTIWEB_IMAGE_API_KEY`, keeping the shipped default for any that is
    /// unset.
    pub fn from_env() -> Self {
        Self {
            server_base_path: env::var("CERTIWEB_SERVER_BASE_PATH")
                .unwrap_or_else(|_| DEFAULT_SERVER_BASE_PATH.to_string()),
            image_api_base: env::var("CERTIWEB_IMAGE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_IMAGE_API_BASE.to_string()),
            image_api_key: env::var("CERTIWEB_IMAGE_API_KEY")
                .unwrap_or_else(|_| DEFAULT_IMAGE_API_KEY.to_string()),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            server_base_path: DEFAULT_SERVER_BASE_PATH.to_string(),
            image_api_base: DEFAULT_IMAGE_API_BASE.to_string(),
            image_api_key: DEFAULT_IMAGE_API_KEY.to_string(),
        }
    }
}
