//! Rule definition

use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;
use crate::serializer::RuleRecord;

/// Wildcard for actions in lookups and for roles in rules
pub const ANY: &str = "*";

/// Access rule: who may perform which actions on matching resources
///
/// Rules are created and updated through the registration builder
/// ([`Acl::matching`](crate::Acl::matching)); callers only read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RuleRecord", try_from = "RuleRecord")]
pub struct Rule {
    pub(crate) pattern: Pattern,
    pub(crate) actions: Vec<String>,
    pub(crate) roles: Vec<String>,
    pub(crate) scope: Option<String>,
}

/// Identity of a rule slot: pattern source plus the sorted action set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub source: String,
    pub actions: Vec<String>,
}

impl RuleKey {
    pub fn new(pattern: &Pattern, actions: &[String]) -> Self {
        let mut actions = actions.to_vec();
        actions.sort();
        Self {
            source: pattern.source().to_string(),
            actions,
        }
    }
}

impl Rule {
    pub(crate) fn new(pattern: Pattern, actions: Vec<String>, roles: Vec<String>) -> Self {
        Self {
            pattern,
            actions,
            roles,
            scope: None,
        }
    }

    /// Resource pattern
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Actions in registration order
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Roles in registration order; may contain [`ANY`]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Scope label, if one was attached
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn key(&self) -> RuleKey {
        RuleKey::new(&self.pattern, &self.actions)
    }

    /// Checks whether this rule grants `role` the `action` on `resource`.
    ///
    /// A lookup action of [`ANY`] matches any action set; a role set holding
    /// [`ANY`] matches any role.
    pub fn matches(&self, role: &str, resource: &str, action: &str) -> bool {
        self.pattern.test(resource)
            && (action == ANY || self.actions.iter().any(|a| a == action))
            && self.roles.iter().any(|r| r == ANY || r == role)
    }
}
