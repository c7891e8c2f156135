//! Engine configuration

use serde::{Deserialize, Serialize};

/// What happens when a (resource, actions) key is registered a second time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Overwrite roles and scope of the existing rule, keeping its position
    #[default]
    Replace,
    /// Fail with [`AclError::DuplicateRule`](crate::AclError::DuplicateRule)
    Reject,
}

/// Rule engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Handling of repeated registrations
    pub duplicate_policy: DuplicatePolicy,
}
