//! Error types for the user API client.
//!
//! # Design
//! `UserNotFound` and `ServiceUnavailable` get dedicated variants because
//! callers distinguish "the user does not exist" from "the server is not
//! ready" by variant, never by message text. A body that fails to decode
//! keeps the underlying `serde_json` error. Transport failures are not
//! classified further.

use thiserror::Error;

/// Errors returned by `ApiClient` operations and trigger adapters.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for a user lookup.
    #[error("user not found")]
    UserNotFound,

    /// The server signaled failure: any status >= 400 on the health check,
    /// or >= 500 on a user lookup.
    #[error("the server is not ready")]
    ServiceUnavailable { status: u16 },

    /// A response classified as success did not match the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// No response was received (connection refused, broken stream, bad URL).
    #[error("transport error: {0}")]
    Transport(String),

    /// The trigger configuration lacks a required key.
    #[error("invalid trigger config: {0}")]
    Config(String),
}
