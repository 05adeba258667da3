//! Synchronous client SDK for the CertiWeb vehicle-certification backend.
//!
//! # Overview
//! Wraps the REST backend (auth, cars, reservations, users, history) and the
//! third-party image host behind typed domain services. Session tokens
//! persist through an injected storage port; requests flow through one HTTP
//! adapter that classifies every failure before a service sees it.
//!
//! # Design
//! - `ApiClient` owns base-path joining, bearer-token injection, and the
//!   three-way error classification (`Status` / `Network` / `Request`).
//! - `Transport` is the I/O seam: `UreqTransport` in production, scripted
//!   doubles in tests, the axum mock server in integration tests.
//! - Read-oriented listings swallow failures and return empty; write paths
//!   and identity-sensitive reads surface or fall back explicitly. The split
//!   is per-endpoint and deliberate.
//! - `SessionStore` namespaces credentials by role (`authToken` vs
//!   `adminToken`); token and session are always written and cleared
//!   together.

pub mod api;
pub mod auth;
pub mod cars;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod register;
pub mod reservations;
pub mod session;
pub mod storage;
pub mod types;
pub mod upload;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::ApiClient;
pub use auth::AuthService;
pub use cars::CarService;
pub use client::CertiwebClient;
pub use config::Environment;
pub use error::ApiError;
pub use history::HistoryService;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use register::RegisterService;
pub use reservations::ReservationService;
pub use session::{Role, SessionStore};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use types::{AuthOutcome, Car, Reservation, Session, UploadedImage, User};
pub use upload::ImageUploadService;
pub use users::UserService;
