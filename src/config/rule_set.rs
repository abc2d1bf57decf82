//! Compiled scanners from rule files
//!
//! Each rule file behaves like a scanner type: `extends` names its parent,
//! the parent's rules come first, same-named rules override in place, and an
//! absent `base_pattern` is inherited from the nearest file that sets one.

use crate::config::rule_file::RuleFile;
use crate::engine::{self, ScanReport};
use crate::error::{ConfigError, RegistryError, ScanError};
use crate::rules::{RegistryBuilder, RuleRegistry};
use crate::scanner::{RecordingScanner, record_match};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A scanner compiled from a rule file and its `extends` chain
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    base_pattern: Option<String>,
    registry: RuleRegistry<RecordingScanner>,
}

impl RuleSet {
    /// Load and compile a rule file, following `extends`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any file in the chain cannot be read or
    /// parsed, if the chain is cyclic, or if a rule fails to compile.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_chain(path.as_ref(), &mut Vec::new())
    }

    fn load_chain(path: &Path, stack: &mut Vec<PathBuf>) -> Result<Self, ConfigError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if stack.contains(&key) {
            let mut chain = stack.clone();
            chain.push(key);
            return Err(ConfigError::ExtendsCycle(chain));
        }
        stack.push(key);

        let file = RuleFile::load(path)?;
        let parent = match &file.scanner.extends {
            Some(relative) => {
                let parent_path = path.parent().unwrap_or(Path::new("")).join(relative);
                Some(Self::load_chain(&parent_path, stack)?)
            }
            None => None,
        };
        stack.pop();

        let default_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::compile(file, default_name, parent.as_ref()).map_err(|source| ConfigError::Registry {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Compile a parsed rule file on top of an optional parent
    ///
    /// `file.scanner.extends` is ignored here; the caller supplies the parent.
    pub fn compile(
        file: RuleFile,
        default_name: impl Into<String>,
        parent: Option<&RuleSet>,
    ) -> Result<Self, RegistryError> {
        let name = file.scanner.name.unwrap_or_else(|| default_name.into());
        let base_pattern = file
            .scanner
            .base_pattern
            .or_else(|| parent.and_then(|p| p.base_pattern.clone()));

        let resolved_base = base_pattern.clone().unwrap_or_default();
        let mut builder = match parent {
            Some(parent) => RegistryBuilder::new(name.as_str(), &parent.registry, resolved_base),
            None => RegistryBuilder::root(name.as_str(), resolved_base),
        };
        for entry in &file.rules {
            builder.declare_handler(&entry.name, &entry.pattern, Arc::new(record_match))?;
        }

        Ok(Self {
            name,
            base_pattern,
            registry: builder.build(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base pattern in effect for rules declared in this file
    pub fn base_pattern(&self) -> &str {
        self.base_pattern.as_deref().unwrap_or("")
    }

    pub fn registry(&self) -> &RuleRegistry<RecordingScanner> {
        &self.registry
    }

    /// Scan `lines` into `state`
    pub fn run<I>(&self, state: &mut RecordingScanner, lines: I) -> Result<ScanReport, ScanError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        engine::run(&self.registry, state, lines)
    }

    /// Scan every line of `reader` into `state`
    pub fn run_reader<R: BufRead>(
        &self,
        state: &mut RecordingScanner,
        reader: R,
    ) -> Result<ScanReport, ScanError> {
        engine::run_reader(&self.registry, state, reader)
    }
}
