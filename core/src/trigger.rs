//! Adapters between a contract-test harness and `ApiClient`.
//!
//! A harness hands each trigger a configuration mapping such as
//! `{"baseUrl": "http://127.0.0.1:8080", "variables": {"userId": "123"}}`
//! and expects either a decoded value or an error back. The functions here
//! build a fresh client from that mapping for every call.

use std::collections::HashMap;

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{HealthStatus, User};

/// Variable name the user triggers read the id from.
pub const USER_ID_VARIABLE: &str = "userId";

/// Configuration mapping supplied by the harness for one invocation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    pub base_url: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl TriggerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            variables: HashMap::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Parse the harness's JSON mapping. Shape errors, including a missing
    /// `baseUrl`, come back as `ApiError::Config`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        serde_json::from_value(value).map_err(|e| ApiError::Config(e.to_string()))
    }

    pub fn variable(&self, name: &str) -> Result<&str, ApiError> {
        self.variables
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ApiError::Config(format!("missing variable `{name}`")))
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url)
    }
}

/// A callable the harness invokes with its configuration.
pub trait Trigger<T> {
    fn trigger(&self, config: &TriggerConfig) -> Result<T, ApiError>;
}

impl<T, F> Trigger<T> for F
where
    F: Fn(&TriggerConfig) -> Result<T, ApiError>,
{
    fn trigger(&self, config: &TriggerConfig) -> Result<T, ApiError> {
        self(config)
    }
}

/// Returns the status string reported by `GET /health`.
pub fn get_health(config: &TriggerConfig) -> Result<String, ApiError> {
    config.client().get_health().map(|HealthStatus { status }| status)
}

/// Looks up the `userId` variable via `GET /users/{id}`.
pub fn get_user_by_path(config: &TriggerConfig) -> Result<User, ApiError> {
    let id = config.variable(USER_ID_VARIABLE)?;
    config.client().get_user(id)
}

/// Looks up the `userId` variable via `GET /users?id={id}`.
pub fn get_user_by_query(config: &TriggerConfig) -> Result<User, ApiError> {
    let id = config.variable(USER_ID_VARIABLE)?;
    config.client().get_user_by_query(id)
}

/// A by-path trigger that ignores the harness variables and always asks
/// for `id`.
pub fn get_fixed_user(id: impl Into<String>) -> impl Fn(&TriggerConfig) -> Result<User, ApiError> {
    let id = id.into();
    move |config: &TriggerConfig| config.client().get_user(&id)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn config_parses_harness_mapping() {
        let config = TriggerConfig::from_value(json!({
            "baseUrl": "http://localhost:8080",
            "variables": { "userId": "123" },
        }))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.variable("userId").unwrap(), "123");
    }

    #[test]
    fn config_variables_default_to_empty() {
        let config = TriggerConfig::from_value(json!({ "baseUrl": "http://x" })).unwrap();
        assert!(config.variables.is_empty());
    }

    #[test]
    fn config_without_base_url_is_config_error() {
        let err = TriggerConfig::from_value(json!({ "variables": {} })).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn missing_variable_names_the_key() {
        let err = TriggerConfig::new("http://x").variable("userId").unwrap_err();
        assert_eq!(err.to_string(), "invalid trigger config: missing variable `userId`");
    }

    #[test]
    fn user_triggers_fail_before_any_request_without_user_id() {
        // Unroutable base URL: reaching the network would yield Transport instead.
        let config = TriggerConfig::new("http://127.0.0.1:1");
        assert!(matches!(get_user_by_path(&config).unwrap_err(), ApiError::Config(_)));
        assert!(matches!(get_user_by_query(&config).unwrap_err(), ApiError::Config(_)));
    }

    #[test]
    fn closures_are_triggers() {
        let echo = |config: &TriggerConfig| Ok::<_, ApiError>(config.base_url.clone());
        let config = TriggerConfig::new("http://x").with_variable("userId", "1");
        assert_eq!(echo.trigger(&config).unwrap(), "http://x");
    }
}
