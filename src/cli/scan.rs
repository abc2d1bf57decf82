//! Scan command implementation
//!
//! This module implements the `linescan scan` command, which:
//! - Loads and compiles the rule file (following `extends`)
//! - Scans each input in order with one shared scanner state
//! - Prints per-rule hits (and optionally captured records)
//! - Returns an appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_NO_MATCH, EXIT_SUCCESS, config_exit_code, load_rule_set,
};
use crate::config::RuleSet;
use crate::engine::ScanReport;
use crate::error::{ConfigError, ScanError};
use crate::output::{HumanFormatter, JsonlFormatter, ScanSummary};
use crate::scanner::{RecordingScanner, ScanState};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use termcolor::StandardStream;

/// Error type specific to the scan command
#[derive(Debug, thiserror::Error)]
pub(crate) enum ScanCommandError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: ScanError,
    },

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Options for the scan command
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub rules: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub format: OutputFormat,
    pub records: bool,
    pub require_match: bool,
    pub color: ColorChoice,
}

/// Run the scan command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 1: No line matched and `--require-match` was given
/// - 2: Error (I/O, invalid rules, unreadable input)
/// - 3: Parse error (invalid TOML rule file)
pub fn run_scan(options: &ScanOptions) -> i32 {
    match run_scan_inner(options) {
        Ok(report) => {
            if options.require_match && report.matched == 0 {
                EXIT_NO_MATCH
            } else {
                EXIT_SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                ScanCommandError::Config(ref err) => config_exit_code(err),
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_scan_inner(options: &ScanOptions) -> Result<ScanReport, ScanCommandError> {
    let rule_set = load_rule_set(&options.rules)?;

    if rule_set.registry().is_empty() {
        eprintln!("Warning: {} declares no rules. Nothing will match.", rule_set.name());
    }

    let mut state = if options.records {
        RecordingScanner::new()
    } else {
        RecordingScanner::counting()
    };

    let report = scan_inputs(&rule_set, &mut state, &options.inputs)?;

    let hits = state.hits().clone();
    let summary = ScanSummary::new(
        rule_set.name(),
        rule_set.registry(),
        &hits,
        state.into_records(),
        report,
    );

    match options.format {
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(options.color.into());
            HumanFormatter::new()
                .with_records(options.records)
                .write_scan(&mut stdout, &summary)?;
        }
        OutputFormat::Jsonl => {
            let output = JsonlFormatter::new()
                .with_records(options.records)
                .format_scan(&summary);
            io::stdout().lock().write_all(output.as_bytes())?;
        }
    }

    Ok(report)
}

/// Scans every input in order; stdin when `inputs` is empty or `-`
fn scan_inputs(
    rule_set: &RuleSet,
    state: &mut RecordingScanner,
    inputs: &[PathBuf],
) -> Result<ScanReport, ScanCommandError> {
    let stdin_only = [PathBuf::from("-")];
    let inputs = if inputs.is_empty() {
        &stdin_only[..]
    } else {
        inputs
    };

    let mut total = ScanReport::default();
    for path in inputs {
        let report = scan_input(rule_set, state, path)?;
        tracing::debug!(
            input = %path.display(),
            lines = report.lines,
            matched = report.matched,
            "scanned input"
        );
        total.lines += report.lines;
        total.matched += report.matched;
    }
    Ok(total)
}

fn scan_input(
    rule_set: &RuleSet,
    state: &mut RecordingScanner,
    path: &Path,
) -> Result<ScanReport, ScanCommandError> {
    let result = if path == Path::new("-") {
        rule_set.run_reader(state, io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|source| ScanCommandError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        rule_set.run_reader(state, BufReader::new(file))
    };

    result.map_err(|source| ScanCommandError::Input {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleFile;
    use std::fs;
    use tempfile::TempDir;

    fn rule_set() -> RuleSet {
        let file = RuleFile::parse(
            "[[rule]]\nname = \"get\"\npattern = \"GET (?P<path>\\\\S+)\"\n",
        )
        .unwrap();
        RuleSet::compile(file, "web", None).unwrap()
    }

    #[test]
    fn test_scan_inputs_accumulates_across_files() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.log");
        let b = temp_dir.path().join("b.log");
        fs::write(&a, "GET /a\nPOST /x\n").unwrap();
        fs::write(&b, "GET /b\n").unwrap();

        let rule_set = rule_set();
        let mut state = RecordingScanner::new();
        let report = scan_inputs(&rule_set, &mut state, &[a, b]).unwrap();

        assert_eq!(report, ScanReport { lines: 3, matched: 2 });
        assert_eq!(state.hits().get("get"), 2);
        assert_eq!(state.records()[1].fields["path"], Some("/b".to_string()));
    }

    #[test]
    fn test_missing_input_file() {
        let temp_dir = TempDir::new().unwrap();
        let rule_set = rule_set();
        let mut state = RecordingScanner::new();
        let err = scan_inputs(&rule_set, &mut state, &[temp_dir.path().join("nope.log")])
            .unwrap_err();
        assert!(matches!(err, ScanCommandError::Open { .. }));
    }

    #[test]
    fn test_missing_rule_file_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let options = ScanOptions {
            rules: temp_dir.path().join("missing.toml"),
            inputs: vec![],
            format: OutputFormat::Jsonl,
            records: false,
            require_match: false,
            color: ColorChoice::Never,
        };
        assert_eq!(run_scan(&options), EXIT_ERROR);
    }
}
