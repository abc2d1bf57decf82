#![forbid(unsafe_code)]

//! linescan: declarative line scanners
//!
//! A scanner type declares named rules, each a regex anchored at the start of
//! the line plus a handler. Every input line is tried against the rules in
//! declaration order; the first rule that matches counts a hit and runs its
//! handler. Scanner types inherit rules from their ancestors, override them
//! in place, and share an optional base pattern that prefixes every rule.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod types;

// Re-export error types for convenient access
pub use error::{BoxError, ConfigError, LinescanError, RegistryError, ScanError};

// Re-export core types for convenient access
pub use engine::ScanReport;
pub use rules::{HandlerResult, MatchResult, Rule, RuleRegistry};
pub use scanner::{Declarations, ScanState, Scanner};
pub use types::{Hits, RuleName};
