//! Async client core for the greetings single-page app.
//!
//! # Overview
//! Everything the page needs short of rendering: a thin HTTP wrapper over
//! reqwest, typed CRUD operations for the greeting resource, and the
//! view-model that owns list state, form/edit drafts, and request lifecycle
//! flags. A presentation layer consumes `GreetingsView` snapshots and feeds
//! user intents back in as method calls.
//!
//! # Design
//! - Configuration is an explicit `ApiConfig` value constructed at startup;
//!   there is no global mutable state.
//! - Cancellation is cooperative: every network operation takes a
//!   `CancellationToken`, and completion handlers re-check it before
//!   mutating view state.
//! - `GreetingsView` talks to the backend through the `GreetingStore` trait,
//!   so tests drive it with a scripted store instead of a live server.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use api::{GreetingStore, GreetingsApi};
pub use config::ApiConfig;
pub use error::ApiError;
pub use http::HttpClient;
pub use tokio_util::sync::CancellationToken;
pub use types::{CreateGreeting, Greeting, UpdateGreeting};
pub use view::{ConfirmDelete, GreetingsView, ViewSnapshot};
