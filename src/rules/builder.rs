#![forbid(unsafe_code)]

//! Registry construction
//!
//! A builder starts from a copy of the inherited registry and folds in the
//! rules one scanner type declares itself. Every local rule is compiled
//! against the type's resolved base pattern; inherited rules keep the
//! pattern they were compiled with.

use crate::error::RegistryError;
use crate::rules::{Handler, HandlerResult, MatchResult, Rule, RuleRegistry};
use crate::types::RuleName;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Composes the line-anchored pattern for a rule body
///
/// The base must match at the start of the line, followed by any characters,
/// followed by the body. Nothing anchors the end of the line.
pub fn compose_pattern(base: &str, body: &str) -> String {
    format!("^(?:{base}.*{body})")
}

/// Builds the registry for one scanner type
pub struct RegistryBuilder<S> {
    owner: String,
    base_pattern: String,
    registry: RuleRegistry<S>,
    declared: HashSet<String>,
    overridden: Vec<String>,
}

impl<S> std::fmt::Debug for RegistryBuilder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("owner", &self.owner)
            .field("base_pattern", &self.base_pattern)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<S: 'static> RegistryBuilder<S> {
    /// Starts a builder for `owner` from a copy of `inherited`
    pub fn new(
        owner: impl Into<String>,
        inherited: &RuleRegistry<S>,
        base_pattern: impl Into<String>,
    ) -> Self {
        Self::from_registry(owner, inherited.clone(), base_pattern)
    }

    /// Starts a builder for a type with no ancestors
    pub fn root(owner: impl Into<String>, base_pattern: impl Into<String>) -> Self {
        Self::from_registry(owner, RuleRegistry::new(), base_pattern)
    }

    pub(crate) fn from_registry(
        owner: impl Into<String>,
        registry: RuleRegistry<S>,
        base_pattern: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            base_pattern: base_pattern.into(),
            registry,
            declared: HashSet::new(),
            overridden: Vec::new(),
        }
    }

    /// The base pattern local rules are compiled against
    pub fn base_pattern(&self) -> &str {
        &self.base_pattern
    }

    /// Declares a rule on this type
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if:
    /// - `key` is not a valid rule name
    /// - `key` was already declared through this builder
    /// - the composed pattern fails to compile
    pub fn declare<F>(&mut self, key: &str, body: &str, handler: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(&mut S, &MatchResult<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.declare_handler(key, body, Arc::new(handler))?;
        Ok(self)
    }

    pub(crate) fn declare_handler(
        &mut self,
        key: &str,
        body: &str,
        handler: Handler<S>,
    ) -> Result<(), RegistryError> {
        let name =
            RuleName::new(key).ok_or_else(|| RegistryError::InvalidRuleName(key.to_string()))?;

        if !self.declared.insert(key.to_string()) {
            return Err(RegistryError::DuplicateDeclaration {
                rule: key.to_string(),
                owner: self.owner.clone(),
            });
        }

        let composed = compose_pattern(&self.base_pattern, body);
        let pattern = Regex::new(&composed).map_err(|source| RegistryError::PatternCompile {
            rule: key.to_string(),
            pattern: composed.clone(),
            source,
        })?;

        tracing::trace!(owner = %self.owner, rule = key, pattern = %composed, "compiled rule");

        if self.registry.upsert(Rule::new(name, pattern, handler)).is_some() {
            self.overridden.push(key.to_string());
        }
        Ok(())
    }

    /// Freezes the registry
    pub fn build(self) -> RuleRegistry<S> {
        tracing::debug!(
            owner = %self.owner,
            rules = self.registry.len(),
            declared = self.declared.len(),
            overridden = ?self.overridden,
            "built rule registry"
        );
        self.registry
    }
}
