//! Thin wrapper around reqwest with error normalization and cancellation.
//!
//! # Design
//! One entry point, `HttpClient::request`, carries every call the resource
//! API makes. It turns non-success statuses into `ApiError::Http` (with a
//! best-effort parse of the error body as a diagnostic payload), treats an
//! empty success body as a "no value" sentinel rather than a failure, and
//! races every await against the caller's `CancellationToken`. No retries
//! and no timeouts live here; those are the transport's or the caller's
//! concern.

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Performs one JSON request.
    ///
    /// Returns `Ok(None)` when the response succeeded with an empty body,
    /// `Err(ApiError::Cancelled)` when `cancel` fired before completion.
    /// Callers are responsible for discarding results tied to a cancelled
    /// token; no state is mutated here.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.base_url(), path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            sent = builder.send() => sent?,
        };

        let status = response.status();
        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            read = response.text() => read?,
        };

        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        if text.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ApiError::UnexpectedBody(e.to_string()))
    }
}

/// Build the `ApiError::Http` for a non-success response. The body is parsed
/// as JSON when possible; anything else yields an error without a payload.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    ApiError::Http {
        status: status.as_u16(),
        message: format!("API request failed: {status}"),
        payload: serde_json::from_str(body).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_error_keeps_json_payload() {
        let err = status_error(StatusCode::NOT_FOUND, r#"{"detail":"not found"}"#);
        match err {
            ApiError::Http {
                status,
                message,
                payload,
            } => {
                assert_eq!(status, 404);
                assert!(message.contains("404"));
                assert_eq!(payload, Some(json!({"detail": "not found"})));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_error_tolerates_non_json_body() {
        let err = status_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        match err {
            ApiError::Http { status, payload, .. } => {
                assert_eq!(status, 502);
                assert!(payload.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_error_tolerates_empty_body() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.status(), Some(500));
    }
}
