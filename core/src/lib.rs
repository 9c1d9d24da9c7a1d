//! Synchronous client core for the user service.
//!
//! # Overview
//! Issues `GET /health`, `GET /users/{id}` and `GET /users?id={id}`,
//! decodes the JSON bodies into typed values and maps status codes onto
//! three outcomes: a value, `UserNotFound`, or a failure
//! (`ServiceUnavailable`, `Decode`, `Transport`).
//!
//! # Design
//! - `ApiClient` is stateless: it holds only `base_url` and a transport.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (classifies response), so the I/O boundary is explicit. The
//!   blocking `get_*` methods run a `Transport` in between.
//! - `trigger` adapts the client to a contract-test harness that passes a
//!   configuration mapping and expects a value or an error back.
//! - DTOs are defined independently from the mock-provider crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod trigger;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use trigger::{Trigger, TriggerConfig};
pub use types::{HealthStatus, User};
