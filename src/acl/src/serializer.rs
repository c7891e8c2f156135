//! JSON form of a rule set
//!
//! ```json
//! [
//!   { "resource": "/^\\/foo\\/bar\\?$/", "actions": ["GET"], "roles": ["user"], "scope": "READ_FOO" }
//! ]
//! ```
//!
//! `resource` is the pattern source wrapped in `/` delimiters (see
//! [`Pattern::encode`]); `scope` is omitted when unset. Loading replaces the
//! whole rule set and is all-or-nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::collect_names;
use crate::engine::Acl;
use crate::error::{AclError, Result};
use crate::pattern::Pattern;
use crate::registry::RuleRegistry;
use crate::rule::Rule;

/// Wire representation of a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub resource: String,
    pub actions: Vec<String>,
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl From<Rule> for RuleRecord {
    fn from(rule: Rule) -> Self {
        Self {
            resource: rule.pattern.encode(),
            actions: rule.actions,
            roles: rule.roles,
            scope: rule.scope,
        }
    }
}

impl TryFrom<RuleRecord> for Rule {
    type Error = AclError;

    fn try_from(record: RuleRecord) -> Result<Self> {
        let pattern = Pattern::decode(&record.resource)?;

        let actions = collect_names(record.actions).map_err(|e| {
            AclError::Deserialization(format!("rule {} has invalid actions: {e}", record.resource))
        })?;
        let roles = collect_names(record.roles).map_err(|e| {
            AclError::Deserialization(format!("rule {} has invalid roles: {e}", record.resource))
        })?;

        Ok(Self {
            pattern,
            actions,
            roles,
            scope: record.scope,
        })
    }
}

/// Renders the registry's rules, in order, as JSON
pub fn serialize(registry: &RuleRegistry) -> Result<String> {
    serde_json::to_string(registry.as_slice()).map_err(|e| AclError::Serialization(e.to_string()))
}

/// Parses JSON produced by [`serialize`] into an ordered rule list
pub fn deserialize(text: &str) -> Result<Vec<Rule>> {
    let rules: Vec<Rule> =
        serde_json::from_str(text).map_err(|e| AclError::Deserialization(e.to_string()))?;

    let mut keys = HashSet::with_capacity(rules.len());
    for rule in &rules {
        if !keys.insert(rule.key()) {
            return Err(AclError::Deserialization(format!(
                "rule {} for actions {:?} appears more than once",
                rule.pattern, rule.actions
            )));
        }
    }

    Ok(rules)
}

impl Acl {
    /// Serializes the rule set
    pub fn to_json(&self) -> Result<String> {
        serialize(&self.registry)
    }

    /// Replaces the rule set with one produced by [`Acl::to_json`].
    ///
    /// On error the current rules are kept.
    pub fn from_json(&mut self, text: &str) -> Result<()> {
        let rules = deserialize(text)?;
        info!(rules = rules.len(), "Loaded acl rules");
        self.registry.replace_all(rules);
        Ok(())
    }
}
