//! Error types for linescan
//!
//! Errors are grouped by the phase that raises them: registry construction
//! (once per scanner type), scanning (once per run), and rule file loading.

use std::path::PathBuf;

/// Errors raised while building a scanner's rule registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The composed `base + ".*" + body` pattern is not a valid regex
    #[error("Failed to compile pattern for rule '{rule}' ({pattern}): {source}")]
    PatternCompile {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The same rule key was declared twice on one scanner type
    #[error("Rule '{rule}' is declared more than once on {owner}")]
    DuplicateDeclaration { rule: String, owner: String },

    /// Rule key is empty or contains invalid characters
    #[error("Invalid rule name: {0:?}")]
    InvalidRuleName(String),
}

/// Boxed error returned by user handlers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while scanning lines
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The scanner type's registry could not be built
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A handler failed; scanning stopped at this line
    #[error("Handler for rule '{rule}' failed on line {line}: {source}")]
    Handler {
        rule: String,
        line: usize,
        #[source]
        source: BoxError,
    },

    /// Reading the line source failed
    #[error("I/O error reading line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Rule file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Rule file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rule file is not valid TOML or does not fit the schema
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `extends` chain loops back on itself
    #[error("Cyclic extends chain: {}", display_chain(.0))]
    ExtendsCycle(Vec<PathBuf>),

    /// Rules in the file could not be compiled
    #[error("Invalid rules in {path}: {source}")]
    Registry {
        path: PathBuf,
        #[source]
        source: RegistryError,
    },
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Top-level error type for linescan
#[derive(Debug, thiserror::Error)]
pub enum LinescanError {
    /// Registry error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Scan error
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Rule file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
