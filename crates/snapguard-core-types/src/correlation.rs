//! Correlation types for invocation tracking
//!
//! Every dispatched command gets a fresh [`RequestId`] so that the
//! structured events it emits can be grouped together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single dispatched invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new RequestId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. an id supplied by the host)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
