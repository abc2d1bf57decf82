//! List command implementation
//!
//! This module implements the `linescan list` command, which prints the
//! effective rules of a rule file (inherited rules included) in the order
//! they are tried, with each rule's compiled pattern.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, config_exit_code, load_rule_set};
use crate::error::ConfigError;
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io::{self, Write};
use std::path::Path;
use termcolor::StandardStream;

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Parse error (invalid TOML rule file)
pub fn run_list(rules: &Path, format: OutputFormat, color: ColorChoice) -> i32 {
    match run_list_inner(rules, format, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                ListError::Config(ref err) => config_exit_code(err),
                ListError::Io(_) => EXIT_ERROR,
            }
        }
    }
}

fn run_list_inner(rules: &Path, format: OutputFormat, color: ColorChoice) -> Result<(), ListError> {
    let rule_set = load_rule_set(rules)?;

    match format {
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(color.into());
            HumanFormatter::new().write_rules(
                &mut stdout,
                rule_set.name(),
                rule_set.base_pattern(),
                rule_set.registry(),
            )?;
        }
        OutputFormat::Jsonl => {
            let output = JsonlFormatter::new().format_rules(
                rule_set.name(),
                rule_set.base_pattern(),
                rule_set.registry(),
            );
            io::stdout().lock().write_all(output.as_bytes())?;
        }
    }

    Ok(())
}
