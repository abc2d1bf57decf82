//! Parsing for scanner rule files
//!
//! A rule file declares one scanner type in TOML:
//!
//! ```toml
//! [scanner]
//! name = "app"
//! base_pattern = "(?P<ts>\\S+) (?P<level>[A-Z]+) "
//! extends = "common.toml"
//!
//! [[rule]]
//! name = "request"
//! pattern = "GET (?P<path>\\S+)"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed contents of one rule file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    /// Scanner-level settings
    #[serde(default)]
    pub scanner: ScannerSection,

    /// Rules in declaration order
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,
}

/// `[scanner]` section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerSection {
    /// Display name, defaults to the file stem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Base pattern for this file's rules; inherited when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_pattern: Option<String>,

    /// Parent rule file, relative to this file's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<PathBuf>,
}

/// One `[[rule]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    pub name: String,
    pub pattern: String,
}

impl RuleFile {
    /// Load a rule file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a rule file from a TOML string
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
