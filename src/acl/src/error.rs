//! Error types for the rule engine

use thiserror::Error;

/// Rule engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AclError {
    /// Resource is neither a literal string nor a valid pattern expression
    #[error("Cannot do acl match, resources must be a string or regex: {0}")]
    InvalidResource(String),

    /// Actions list is empty or holds an empty action
    #[error("Cannot add acl rule, actions must be strings or an array: {0}")]
    InvalidActions(String),

    /// Roles list is empty or holds an empty role
    #[error("Cannot add acl rule, roles must be strings or an array: {0}")]
    InvalidRoles(String),

    /// Same (resource, actions) key registered twice under the reject policy
    #[error("Rules have already been defined for resource {resource} and actions {actions:?}")]
    DuplicateRule {
        resource: String,
        actions: Vec<String>,
    },

    /// Lookup argument is not a string
    #[error("Cannot check permission with this {argument}. It should be a string, but it is a: {actual}")]
    InvalidArgument {
        argument: &'static str,
        actual: &'static str,
    },

    /// Serialized rule set is malformed
    #[error("Cannot load acl rules: {0}")]
    Deserialization(String),

    /// Rule set could not be rendered
    #[error("Cannot serialize acl rules: {0}")]
    Serialization(String),
}

/// Result type for rule engine operations
pub type Result<T> = std::result::Result<T, AclError>;
