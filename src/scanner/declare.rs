#![forbid(unsafe_code)]

//! Type-level rule declarations
//!
//! A scanner type lists its ancestors, its own base pattern and its own rules
//! in [`Scanner::declare`](crate::scanner::Scanner::declare). The declarations
//! are resolved once into a [`Compiled`] registry for the type.

use crate::error::RegistryError;
use crate::rules::{Handler, HandlerResult, MatchResult, Projection, RegistryBuilder, RuleRegistry};
use crate::scanner::{Scanner, cache};
use std::sync::Arc;

/// Resolved per-type data: the registry and the base pattern
pub struct Compiled<S> {
    pub(crate) registry: RuleRegistry<S>,
    pub(crate) base_pattern: Option<String>,
}

impl<S: 'static> Compiled<S> {
    pub fn registry(&self) -> &RuleRegistry<S> {
        &self.registry
    }

    /// Base pattern in effect for this type (empty when none is declared)
    pub fn base_pattern(&self) -> &str {
        self.base_pattern.as_deref().unwrap_or("")
    }
}

struct Inherited<S> {
    registry: RuleRegistry<S>,
    base_pattern: Option<String>,
}

type Resolve<S> = Box<dyn FnOnce() -> Result<Inherited<S>, RegistryError>>;

struct Ancestor<S> {
    name: &'static str,
    resolve: Resolve<S>,
}

struct Declaration<S> {
    key: String,
    pattern: String,
    handler: Handler<S>,
}

/// Declarations collected from one scanner type
///
/// Nothing is validated while declaring; duplicate keys and bad patterns are
/// reported when the registry is compiled.
pub struct Declarations<S> {
    ancestors: Vec<Ancestor<S>>,
    base_pattern: Option<String>,
    rules: Vec<Declaration<S>>,
}

impl<S: 'static> Declarations<S> {
    pub(crate) fn new() -> Self {
        Self {
            ancestors: Vec::new(),
            base_pattern: None,
            rules: Vec::new(),
        }
    }

    /// Inherits from scanner type `P`, whose state is reached via `project`
    ///
    /// Ancestors are searched in the order they are declared. The first
    /// ancestor provides both the inherited registry and the inherited base
    /// pattern; an ancestor without a base pattern resolves to `""`.
    pub fn extends<P: Scanner>(&mut self, project: Projection<S, P>) -> &mut Self {
        self.ancestors.push(Ancestor {
            name: std::any::type_name::<P>(),
            resolve: Box::new(move || {
                let compiled = cache::compiled::<P>()?;
                Ok(Inherited {
                    registry: compiled.registry.lift(project),
                    base_pattern: compiled.base_pattern.clone(),
                })
            }),
        });
        self
    }

    /// Sets the base pattern for rules declared on this type
    pub fn base_pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.base_pattern = Some(pattern.into());
        self
    }

    /// Declares a rule; a key matching an inherited rule overrides it in place
    pub fn rule<F>(&mut self, key: impl Into<String>, pattern: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut S, &MatchResult<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.rules.push(Declaration {
            key: key.into(),
            pattern: pattern.into(),
            handler: Arc::new(handler),
        });
        self
    }

    /// Resolves ancestors and compiles the local rules
    pub(crate) fn compile(self, owner: &str) -> Result<Compiled<S>, RegistryError> {
        let mut first: Option<Inherited<S>> = None;

        for ancestor in self.ancestors {
            let inherited = (ancestor.resolve)()?;
            tracing::trace!(owner, ancestor = ancestor.name, "resolved ancestor");
            if first.is_none() {
                first = Some(inherited);
            }
        }

        let (registry, inherited_base) = match first {
            Some(inherited) => (inherited.registry, inherited.base_pattern),
            None => (RuleRegistry::new(), None),
        };
        let base_pattern = self.base_pattern.or(inherited_base);
        let mut builder = RegistryBuilder::from_registry(
            owner,
            registry,
            base_pattern.clone().unwrap_or_default(),
        );
        for declaration in self.rules {
            builder.declare_handler(&declaration.key, &declaration.pattern, declaration.handler)?;
        }

        Ok(Compiled {
            registry: builder.build(),
            base_pattern,
        })
    }
}
