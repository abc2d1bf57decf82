#![forbid(unsafe_code)]

//! Core domain types for linescan

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A validated rule name
///
/// Rule names must be non-empty and contain only alphanumeric characters,
/// hyphens, underscores and dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleName(String);

impl RuleName {
    /// Creates a new RuleName, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return None;
        }
        Some(RuleName(name))
    }

    /// Returns the rule name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RuleName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleName::new(value.clone()).ok_or_else(|| format!("Invalid rule name: {value:?}"))
    }
}

impl From<RuleName> for String {
    fn from(name: RuleName) -> Self {
        name.0
    }
}

impl AsRef<str> for RuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-rule match counts for one scanner instance
///
/// Any rule that never matched reads as zero. Only rules with at least one
/// hit are stored, so two `Hits` compare equal when their non-zero counts do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hits(HashMap<String, u64>);

impl Hits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `rule`, zero if it never matched
    pub fn get(&self, rule: &str) -> u64 {
        self.0.get(rule).copied().unwrap_or(0)
    }

    /// Adds one hit for `rule`
    pub fn increment(&mut self, rule: &str) {
        self.add(rule, 1);
    }

    /// Adds `count` hits for `rule`
    pub fn add(&mut self, rule: &str, count: u64) {
        if count == 0 {
            return;
        }
        *self.0.entry(rule.to_string()).or_insert(0) += count;
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct rules with at least one hit
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(rule, count)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Resets every count to zero
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Hits {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        let mut hits = Hits::new();
        for (rule, count) in iter {
            let rule: String = rule.into();
            hits.add(&rule, count);
        }
        hits
    }
}
