//! Domain values returned by the user API.
//!
//! # Design
//! Defined independently of the mock provider's response types; the
//! integration tests catch schema drift between the two crates. `User`
//! ignores unknown fields so providers can add data without breaking
//! existing clients.

use serde::{Deserialize, Serialize};

/// Body of `GET /health`. Unlike `User`, extra fields are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HealthStatus {
    pub status: String,
}

/// A user as returned by `GET /users/{id}` and `GET /users?id={id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl User {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
