//! Middleware configuration

use serde::{Deserialize, Serialize};

/// Role used when no authenticated role is present
pub const DEFAULT_ANONYMOUS_ROLE: &str = "guest";

/// Request guard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Role checked for unauthenticated requests; denials for it answer 401
    pub anonymous_role: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            anonymous_role: DEFAULT_ANONYMOUS_ROLE.to_string(),
        }
    }
}

impl GuardConfig {
    pub fn with_anonymous_role(anonymous_role: impl Into<String>) -> Self {
        Self {
            anonymous_role: anonymous_role.into(),
        }
    }
}
