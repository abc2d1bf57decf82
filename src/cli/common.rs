//! Common helper functions shared across CLI commands

use crate::config::RuleSet;
use crate::error::ConfigError;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NO_MATCH: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "LINESCAN_LOG";

/// Installs the stderr log subscriber
///
/// `LINESCAN_LOG` takes precedence; otherwise warnings only, or `debug` for
/// this crate with `--verbose`. Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "linescan=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load and compile a rule file
pub(crate) fn load_rule_set(path: &Path) -> Result<RuleSet, ConfigError> {
    let rule_set = RuleSet::load(path)?;
    tracing::debug!(
        path = %path.display(),
        scanner = rule_set.name(),
        rules = rule_set.registry().len(),
        "loaded rule file"
    );
    Ok(rule_set)
}

/// Exit code for a configuration error
pub(crate) fn config_exit_code(err: &ConfigError) -> i32 {
    match err {
        ConfigError::Parse { .. } => EXIT_PARSE_ERROR,
        _ => EXIT_ERROR,
    }
}
