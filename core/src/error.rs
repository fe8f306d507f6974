//! Error types for the greetings API client.
//!
//! # Design
//! `Cancelled` gets a dedicated variant because callers treat it differently
//! from every real failure: a cancelled operation is silently discarded, not
//! shown to the user. Non-success statuses land in `Http` with the raw
//! status code and whatever diagnostic payload the server sent.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the HTTP client and the resource API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status code. `payload` is the
    /// best-effort JSON parse of the error body; an unparseable body leaves
    /// it `None` rather than producing a secondary error.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The operation was cancelled via its `CancellationToken`.
    #[error("request cancelled")]
    Cancelled,

    /// A success response carried a body the client could not interpret.
    /// This is a client bug, not a recoverable server condition.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Status code, when the failure came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
