#![forbid(unsafe_code)]

//! Ordered rule registry
//!
//! The registry keeps rules in insertion order and indexes them by name.
//! Overriding a name replaces the rule in place, so its position in the
//! matching order does not change.

use crate::rules::{Projection, Rule};
use std::collections::HashMap;
use std::fmt;

/// Ordered mapping from rule name to compiled rule
pub struct RuleRegistry<S> {
    rules: Vec<Rule<S>>,
    index: HashMap<String, usize>,
}

impl<S: 'static> RuleRegistry<S> {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts `rule`, replacing an existing rule of the same name in place
    ///
    /// Returns the replaced rule, if any.
    pub(crate) fn upsert(&mut self, rule: Rule<S>) -> Option<Rule<S>> {
        match self.index.get(rule.name().as_str()) {
            Some(&position) => Some(std::mem::replace(&mut self.rules[position], rule)),
            None => {
                self.index
                    .insert(rule.name().as_str().to_string(), self.rules.len());
                self.rules.push(rule);
                None
            }
        }
    }

    /// Get a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule<S>> {
        self.index.get(name).map(|&position| &self.rules[position])
    }

    /// Ordinal position of a rule in matching order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over rules in matching order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule<S>> {
        self.rules.iter()
    }

    /// Rule names in matching order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name().as_str())
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Copy of this registry whose handlers run against a type embedding `S`
    pub fn lift<T: 'static>(&self, project: Projection<T, S>) -> RuleRegistry<T> {
        RuleRegistry {
            rules: self.rules.iter().map(|rule| rule.lift(project)).collect(),
            index: self.index.clone(),
        }
    }
}

impl<S: 'static> Default for RuleRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for RuleRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            index: self.index.clone(),
        }
    }
}

impl<S> fmt::Debug for RuleRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter()).finish()
    }
}

impl<'r, S> IntoIterator for &'r RuleRegistry<S> {
    type Item = &'r Rule<S>;
    type IntoIter = std::slice::Iter<'r, Rule<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
