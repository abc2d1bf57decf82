#![forbid(unsafe_code)]

//! Sequential line dispatch
//!
//! Each line is tried against the registry's rules in order until one
//! matches. The matching rule's hit count is incremented before its handler
//! runs; a failing handler stops the scan with that increment kept.

use crate::error::ScanError;
use crate::rules::{Rule, RuleRegistry};
use crate::scanner::ScanState;
use serde::Serialize;
use std::io::BufRead;

/// Summary of one scan session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Number of lines read
    pub lines: usize,
    /// Number of lines some rule matched
    pub matched: usize,
}

impl ScanReport {
    /// Lines no rule matched
    pub fn unmatched(&self) -> usize {
        self.lines.saturating_sub(self.matched)
    }
}

/// Applies the first matching rule to a single line
///
/// Returns the rule that fired, or `None` when no rule matched.
///
/// # Errors
///
/// Returns `ScanError::Handler` if the rule's handler fails. The hit has
/// already been recorded at that point.
pub fn dispatch<'r, S: ScanState + 'static>(
    registry: &'r RuleRegistry<S>,
    state: &mut S,
    line: &str,
    line_number: usize,
) -> Result<Option<&'r Rule<S>>, ScanError> {
    let Some((rule, m)) = registry
        .iter()
        .find_map(|rule| rule.try_match(line, line_number).map(|m| (rule, m)))
    else {
        return Ok(None);
    };

    state.hits_mut().increment(rule.name().as_str());
    rule.apply(state, &m).map_err(|source| ScanError::Handler {
        rule: rule.name().to_string(),
        line: line_number,
        source,
    })?;
    Ok(Some(rule))
}

/// Scans `lines` in order with `registry`
///
/// # Errors
///
/// Returns the first handler failure; lines after it are not read.
pub fn run<S, I>(registry: &RuleRegistry<S>, state: &mut S, lines: I) -> Result<ScanReport, ScanError>
where
    S: ScanState + 'static,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut report = ScanReport::default();

    for (index, line) in lines.into_iter().enumerate() {
        report.lines += 1;
        if dispatch(registry, state, line.as_ref(), index + 1)?.is_some() {
            report.matched += 1;
        }
    }

    tracing::debug!(lines = report.lines, matched = report.matched, "scan finished");
    Ok(report)
}

/// Scans every line of `reader`; `\n` and `\r\n` terminators are stripped
///
/// # Errors
///
/// Returns `ScanError::Io` if reading fails (including invalid UTF-8), or the
/// first handler failure.
pub fn run_reader<S, R>(registry: &RuleRegistry<S>, state: &mut S, reader: R) -> Result<ScanReport, ScanError>
where
    S: ScanState + 'static,
    R: BufRead,
{
    let mut report = ScanReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| ScanError::Io {
            line: line_number,
            source,
        })?;
        report.lines += 1;
        if dispatch(registry, state, &line, line_number)?.is_some() {
            report.matched += 1;
        }
    }

    tracing::debug!(lines = report.lines, matched = report.matched, "scan finished");
    Ok(report)
}
