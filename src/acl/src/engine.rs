//! Decision engine
//!
//! [`Acl`] owns the rule registry and answers lookups. Lookups are
//! whitelist-only: without a matching rule the answer is deny.
//!
//! # Architecture
//!
//! ```text
//! matching → for_actions → allow → as_scope     (writes)
//!                             ↓
//!                       RuleRegistry
//!                             ↓
//! find_rule / is_allowed / decide               (reads, newest rule first)
//! ```

use serde_json::Value;
use tracing::debug;

use crate::builder::Matched;
use crate::config::AclConfig;
use crate::error::{AclError, Result};
use crate::pattern::IntoPattern;
use crate::registry::RuleRegistry;
use crate::rule::Rule;

/// Outcome of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'a> {
    /// Whether the request is allowed
    pub allowed: bool,

    /// Rule that granted access
    pub rule: Option<&'a Rule>,
}

impl<'a> Decision<'a> {
    fn from_rule(rule: Option<&'a Rule>) -> Self {
        Self {
            allowed: rule.is_some(),
            rule,
        }
    }

    /// Scope of the granting rule; never set on a deny
    pub fn scope(&self) -> Option<&'a str> {
        self.rule.and_then(Rule::scope)
    }
}

/// Access-control list
///
/// # Example
///
/// ```
/// use seal_acl::{Acl, Expr};
///
/// let mut acl = Acl::new();
/// acl.matching("/secret")?.for_actions(["GET"])?.allow(["admin"])?.as_scope("SECRET_GETTER");
/// acl.matching(Expr("^/public"))?.for_actions(["GET"])?.allow_any()?;
///
/// assert!(acl.is_allowed("admin", "/secret", "GET"));
/// assert!(!acl.is_allowed("user", "/secret", "GET"));
/// assert!(acl.is_allowed("anyone", "/public/index.html", "GET"));
/// assert_eq!(acl.decide("admin", "/secret", "GET").scope(), Some("SECRET_GETTER"));
/// # Ok::<(), seal_acl::AclError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Acl {
    pub(crate) registry: RuleRegistry,
    pub(crate) config: AclConfig,
}

impl Acl {
    /// Creates an empty ACL with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ACL with the given configuration
    pub fn with_config(config: AclConfig) -> Self {
        Self {
            registry: RuleRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    /// Rules in registration order
    pub fn rules(&self) -> &[Rule] {
        self.registry.as_slice()
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Starts a rule for `resource`.
    ///
    /// Strings are matched literally; pass an [`Expr`](crate::Expr), a
    /// [`Regex`](regex::Regex) or a [`Pattern`](crate::Pattern) to match by
    /// expression.
    pub fn matching(&mut self, resource: impl IntoPattern) -> Result<Matched<'_>> {
        let pattern = resource.into_pattern()?;
        Ok(Matched::new(self, pattern))
    }

    /// Most recently registered rule granting `role` the `action` on `resource`
    pub fn find_rule(&self, role: &str, resource: &str, action: &str) -> Option<&Rule> {
        self.registry.find(role, resource, action)
    }

    /// Checks whether `role` may perform `action` on `resource`
    pub fn is_allowed(&self, role: &str, resource: &str, action: &str) -> bool {
        self.find_rule(role, resource, action).is_some()
    }

    /// Checks dynamically typed arguments, e.g. taken from a JSON payload.
    ///
    /// Every argument must be a string; the first one that is not is reported
    /// with its JSON type.
    pub fn is_allowed_value(&self, role: &Value, resource: &Value, action: &Value) -> Result<bool> {
        let role = string_arg("role", role)?;
        let resource = string_arg("resource", resource)?;
        let action = string_arg("action", action)?;

        Ok(self.is_allowed(role, resource, action))
    }

    /// Looks up the triple and returns the decision with its granting rule
    pub fn decide(&self, role: &str, resource: &str, action: &str) -> Decision<'_> {
        Decision::from_rule(self.find_rule(role, resource, action))
    }

    /// Removes every rule
    pub fn reset(&mut self) {
        debug!(removed = self.registry.len(), "Reset acl rules");
        self.registry.clear();
    }
}

fn string_arg<'v>(argument: &'static str, value: &'v Value) -> Result<&'v str> {
    value.as_str().ok_or(AclError::InvalidArgument {
        argument,
        actual: json_type(value),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
