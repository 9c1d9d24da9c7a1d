//! Stateless request builder, response classifier and blocking client for
//! the user API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and a `Transport`, and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! classifies an `HttpResponse`. The blocking `get_*` methods run the
//! transport between the two; the pure halves stay usable on their own.
//!
//! Status classification is exact: the health check fails on `>= 400`,
//! user lookups fail on `== 404` (not found) and `>= 500` (unavailable).
//! The by-path lookup tests 404 first, the by-query lookup tests `>= 500`
//! first. The predicates are disjoint, so both orders agree.
//!
//! Ids are spliced into the path and query verbatim, without percent
//! encoding.

use serde::de::{self, DeserializeOwned, Unexpected};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{HealthStatus, User};

const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");

/// Synchronous, stateless client for the user API.
///
/// Cloning is cheap when the transport is; concurrent calls on a shared
/// client need no locking.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_health(&self) -> HttpRequest {
        self.get(format!("{}/health", self.base_url))
    }

    pub fn build_get_user(&self, id: &str) -> HttpRequest {
        self.get(format!("{}/users/{id}", self.base_url))
    }

    pub fn build_get_user_by_query(&self, id: &str) -> HttpRequest {
        self.get(format!("{}/users?id={id}", self.base_url))
    }

    pub fn parse_get_health(&self, response: HttpResponse) -> Result<HealthStatus, ApiError> {
        if response.status >= 400 {
            return Err(ApiError::ServiceUnavailable {
                status: response.status,
            });
        }
        decode(&response)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        if response.status == 404 {
            return Err(ApiError::UserNotFound);
        }
        if response.status >= 500 {
            return Err(ApiError::ServiceUnavailable {
                status: response.status,
            });
        }
        decode(&response)
    }

    pub fn parse_get_user_by_query(&self, response: HttpResponse) -> Result<User, ApiError> {
        if response.status >= 500 {
            return Err(ApiError::ServiceUnavailable {
                status: response.status,
            });
        }
        if response.status == 404 {
            return Err(ApiError::UserNotFound);
        }
        decode(&response)
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![(ACCEPT_JSON.0.to_string(), ACCEPT_JSON.1.to_string())],
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// `GET /health`, returning the reported status.
    pub fn get_health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.transport.execute(&self.build_get_health())?;
        self.parse_get_health(response)
    }

    /// `GET /users/{id}`.
    pub fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let response = self.transport.execute(&self.build_get_user(id))?;
        self.parse_get_user(response)
    }

    /// `GET /users?id={id}`.
    pub fn get_user_by_query(&self, id: &str) -> Result<User, ApiError> {
        let response = self.transport.execute(&self.build_get_user_by_query(id))?;
        self.parse_get_user_by_query(response)
    }
}

/// Decode a body that must be a JSON object. Derived `Deserialize` alone
/// also accepts a struct written as an array.
fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    let value: Value = serde_json::from_str(&response.body)?;
    if value.is_object() {
        return Ok(serde_json::from_value(value)?);
    }
    let unexpected = match &value {
        Value::Object(_) => Unexpected::Map,
        Value::Array(_) => Unexpected::Seq,
        Value::String(s) => Unexpected::Str(s),
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::Null => Unexpected::Unit,
    };
    Err(ApiError::Decode(de::Error::invalid_type(unexpected, &"a JSON object")))
}
