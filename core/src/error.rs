//! Error types for the CertiWeb API client.
//!
//! # Design
//! The adapter classifies every failure into one of three kinds before a
//! service ever sees it: the server answered with a status (`Status`), no
//! response arrived at all (`Network`), or the request could not be built in
//! the first place (`Request`). Services match on the variant instead of
//! probing an opaque error for fields.
//!
//! Display strings are part of the contract: UI code shows them verbatim, so
//! `Network` and `NoSession` render fixed messages and `Status` prefers the
//! server-supplied `message` body field over a generic one.

use thiserror::Error;

/// Errors produced by the HTTP adapter and the domain services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` holds the
    /// server body's `message` field when one was present.
    #[error("{}", status_message(.status, .message))]
    Status { status: u16, message: Option<String> },

    /// The request went out but no response came back.
    #[error("Could not connect to server")]
    Network(String),

    /// The request could not be constructed (e.g. the payload failed to
    /// serialize).
    #[error("Error configuring request: {0}")]
    Request(String),

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// An operation that needs an acting user was called without one.
    #[error("No active session found")]
    NoSession,

    /// The image host rejected an upload.
    #[error("Error al subir imagen: {0}")]
    Upload(String),
}

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP {status}"),
    }
}

impl ApiError {
    /// Status code of the server rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
