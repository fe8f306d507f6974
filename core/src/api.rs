//! Typed CRUD operations for the greeting collection.
//!
//! # Design
//! `GreetingsApi` maps each operation to one HTTP verb and path on
//! `/api/v1/greetings/` and delegates the round-trip to `HttpClient`. The
//! view-model consumes these operations through the `GreetingStore` trait so
//! tests can substitute a scripted store. No operation retries; failures are
//! surfaced as-is, and the cancellation token is passed through unchanged.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::{CreateGreeting, Greeting, UpdateGreeting};

const COLLECTION: &str = "/api/v1/greetings/";

/// Everything outside the RFC 3986 unreserved set is escaped when an id is
/// placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn item_path(id: &str) -> String {
    format!("{COLLECTION}{}", utf8_percent_encode(id, PATH_SEGMENT))
}

/// The backend surface the view-model depends on.
#[async_trait]
pub trait GreetingStore: Send + Sync {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Greeting>, ApiError>;

    async fn create(
        &self,
        input: &CreateGreeting,
        cancel: &CancellationToken,
    ) -> Result<Greeting, ApiError>;

    async fn get(&self, id: &str, cancel: &CancellationToken) -> Result<Greeting, ApiError>;

    async fn update(
        &self,
        id: &str,
        input: &UpdateGreeting,
        cancel: &CancellationToken,
    ) -> Result<Greeting, ApiError>;

    /// Returns the backend's acknowledgement object, whatever its shape.
    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<Value, ApiError>;
}

/// Live `GreetingStore` over HTTP.
#[derive(Debug, Clone)]
pub struct GreetingsApi {
    client: HttpClient,
}

impl GreetingsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

/// A success status with an empty body where a document was required.
fn require_body<T>(parsed: Option<T>) -> Result<T, ApiError> {
    parsed.ok_or_else(|| ApiError::UnexpectedBody("empty response body".to_string()))
}

#[async_trait]
impl GreetingStore for GreetingsApi {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Greeting>, ApiError> {
        require_body(
            self.client
                .request::<Vec<Greeting>, ()>(Method::GET, COLLECTION, None, cancel)
                .await?,
        )
    }

    async fn create(
        &self,
        input: &CreateGreeting,
        cancel: &CancellationToken,
    ) -> Result<Greeting, ApiError> {
        require_body(
            self.client
                .request(Method::POST, COLLECTION, Some(input), cancel)
                .await?,
        )
    }

    async fn get(&self, id: &str, cancel: &CancellationToken) -> Result<Greeting, ApiError> {
        require_body(
            self.client
                .request::<Greeting, ()>(Method::GET, &item_path(id), None, cancel)
                .await?,
        )
    }

    async fn update(
        &self,
        id: &str,
        input: &UpdateGreeting,
        cancel: &CancellationToken,
    ) -> Result<Greeting, ApiError> {
        require_body(
            self.client
                .request(Method::PATCH, &item_path(id), Some(input), cancel)
                .await?,
        )
    }

    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<Value, ApiError> {
        // An empty-body acknowledgement is fine; report it as a null ack.
        Ok(self
            .client
            .request::<Value, ()>(Method::DELETE, &item_path(id), None, cancel)
            .await?
            .unwrap_or(Value::Null))
    }
}
