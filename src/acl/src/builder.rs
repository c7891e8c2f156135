//! Fluent rule registration
//!
//! ```text
//! acl.matching(resource)?     -> Matched
//!    .for_actions(actions)?   -> ForActions
//!    .allow(roles)?           -> Allowed   (rule is stored here)
//!    .as_scope(scope)         -> &Rule
//! ```
//!
//! Each stage validates its own input, so a malformed rule is rejected at the
//! call that supplied the bad value and nothing is stored.

use tracing::debug;

use crate::config::DuplicatePolicy;
use crate::engine::Acl;
use crate::error::{AclError, Result};
use crate::pattern::Pattern;
use crate::rule::{Rule, RuleKey, ANY};

/// Resource chosen, waiting for actions
#[must_use = "a rule is only stored once `allow` is called"]
pub struct Matched<'a> {
    acl: &'a mut Acl,
    pattern: Pattern,
}

/// Resource and actions chosen, waiting for roles
#[must_use = "a rule is only stored once `allow` is called"]
pub struct ForActions<'a> {
    acl: &'a mut Acl,
    pattern: Pattern,
    actions: Vec<String>,
}

/// Stored rule, optionally labelled with a scope.
///
/// The rule is already in the registry, so dropping this is fine.
pub struct Allowed<'a> {
    acl: &'a mut Acl,
    index: usize,
}

impl<'a> Matched<'a> {
    pub(crate) fn new(acl: &'a mut Acl, pattern: Pattern) -> Self {
        Self { acl, pattern }
    }

    /// Sets the actions the rule covers
    pub fn for_actions<I, S>(self, actions: I) -> Result<ForActions<'a>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let actions = collect_names(actions).map_err(AclError::InvalidActions)?;

        Ok(ForActions {
            acl: self.acl,
            pattern: self.pattern,
            actions,
        })
    }
}

impl<'a> ForActions<'a> {
    /// Grants the actions to the given roles and stores the rule.
    ///
    /// If a rule with the same pattern source and action set already exists,
    /// the configured [`DuplicatePolicy`] decides between overwriting it in
    /// place and failing.
    pub fn allow<I, S>(self, roles: I) -> Result<Allowed<'a>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles = collect_names(roles).map_err(AclError::InvalidRoles)?;
        let key = RuleKey::new(&self.pattern, &self.actions);
        let acl = self.acl;

        let index = match acl.registry.position(&key) {
            Some(index) => match acl.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(AclError::DuplicateRule {
                        resource: self.pattern.encode(),
                        actions: self.actions,
                    });
                }
                DuplicatePolicy::Replace => {
                    let rule = acl.registry.slot_mut(index);
                    rule.pattern = self.pattern;
                    rule.actions = self.actions;
                    rule.roles = roles;
                    rule.scope = None;

                    debug!(
                        resource = %rule.pattern,
                        actions = ?rule.actions,
                        roles = ?rule.roles,
                        index,
                        "Replaced acl rule"
                    );
                    index
                }
            },
            None => {
                debug!(
                    resource = %self.pattern,
                    actions = ?self.actions,
                    roles = ?roles,
                    "Added acl rule"
                );
                acl.registry.push(Rule::new(self.pattern, self.actions, roles))
            }
        };

        Ok(Allowed { acl, index })
    }

    /// Grants the actions to every role
    pub fn allow_any(self) -> Result<Allowed<'a>> {
        self.allow([ANY])
    }
}

impl<'a> Allowed<'a> {
    /// Labels the rule with a scope and returns it
    pub fn as_scope(self, scope: impl Into<String>) -> &'a Rule {
        let acl = self.acl;
        let rule = acl.registry.slot_mut(self.index);
        rule.scope = Some(scope.into());
        rule
    }

    /// The rule as stored
    pub fn rule(&self) -> &Rule {
        &self.acl.registry.as_slice()[self.index]
    }

    /// Returns the engine to chain another registration
    pub fn and(self) -> &'a mut Acl {
        self.acl
    }
}

/// Collects a non-empty list of non-empty names, dropping repeats
pub(crate) fn collect_names<I, S>(names: I) -> std::result::Result<Vec<String>, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut collected: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if name.is_empty() {
            return Err("empty name in list".to_string());
        }
        if !collected.contains(&name) {
            collected.push(name);
        }
    }

    if collected.is_empty() {
        return Err("list is empty".to_string());
    }
    Ok(collected)
}
