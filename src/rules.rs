#![forbid(unsafe_code)]

//! Rule definitions, registry and registry construction

mod builder;
mod registry;
mod rule;

// Re-export core types
pub use builder::{RegistryBuilder, compose_pattern};
pub use registry::RuleRegistry;
pub use rule::{Handler, HandlerResult, MatchResult, Projection, Rule};
