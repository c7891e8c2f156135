//! Ordered rule storage
//!
//! Insertion order is significant: lookups scan from the most recently added
//! rule backwards and the first match wins, so later rules override earlier,
//! broader ones. Replacing a rule keeps its position.

use tracing::trace;

use crate::rule::{Rule, RuleKey};

/// Ordered collection of rules with unique [`RuleKey`]s
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Rule at an index handed out by [`push`](Self::push) or [`position`](Self::position)
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Rule {
        &mut self.rules[index]
    }

    /// Position of the rule occupying `key`
    pub fn position(&self, key: &RuleKey) -> Option<usize> {
        self.rules.iter().position(|rule| &rule.key() == key)
    }

    /// Appends a rule and returns its index.
    ///
    /// Callers check [`position`](Self::position) first; keys stay unique.
    pub(crate) fn push(&mut self, rule: Rule) -> usize {
        self.rules.push(rule);
        self.rules.len() - 1
    }

    /// Swaps in a complete rule list
    pub(crate) fn replace_all(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Most recently added rule matching the triple
    pub fn find(&self, role: &str, resource: &str, action: &str) -> Option<&Rule> {
        let found = self
            .rules
            .iter()
            .rev()
            .find(|rule| rule.matches(role, resource, action));

        trace!(
            role = %role,
            resource = %resource,
            action = %action,
            matched = ?found.map(|rule| rule.pattern().source()),
            "Rule lookup"
        );

        found
    }
}
