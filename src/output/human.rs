#![forbid(unsafe_code)]

//! Human-readable output
//!
//! Writes to any `termcolor::WriteColor`, so color is decided by the caller's
//! stream (or a `termcolor::Buffer` in tests).

use crate::output::ScanSummary;
use crate::rules::RuleRegistry;
use crate::scanner::Record;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter {
    show_records: bool,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            show_records: false,
        }
    }

    /// Also print every captured record before the hit table
    pub fn with_records(mut self, show_records: bool) -> Self {
        self.show_records = show_records;
        self
    }

    /// Writes records (if enabled), per-rule hits and the scan totals
    pub fn write_scan(&self, out: &mut dyn WriteColor, summary: &ScanSummary) -> io::Result<()> {
        if self.show_records && !summary.records.is_empty() {
            for record in &summary.records {
                write_record(out, record)?;
            }
            writeln!(out)?;
        }

        let width = summary.rules.iter().map(|r| r.rule.len()).max().unwrap_or(0);

        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", summary.scanner)?;
        out.reset()?;
        writeln!(
            out,
            ": {} lines, {} matched, {} unmatched",
            summary.report.lines,
            summary.report.matched,
            summary.report.unmatched()
        )?;

        if summary.rules.is_empty() {
            writeln!(out, "  No rules declared.")?;
            return Ok(());
        }

        for rule in &summary.rules {
            write!(out, "  {:width$}  ", rule.rule)?;
            let color = if rule.hits > 0 {
                Color::Green
            } else {
                Color::Yellow
            };
            out.set_color(ColorSpec::new().set_fg(Some(color)))?;
            writeln!(out, "{}", rule.hits)?;
            out.reset()?;
        }
        Ok(())
    }

    /// Writes the effective rule order with compiled patterns
    pub fn write_rules<S: 'static>(
        &self,
        out: &mut dyn WriteColor,
        scanner: &str,
        base_pattern: &str,
        registry: &RuleRegistry<S>,
    ) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{scanner}")?;
        out.reset()?;
        writeln!(out, " ({} rules)", registry.len())?;
        if !base_pattern.is_empty() {
            writeln!(out, "  base pattern: {base_pattern}")?;
        }

        for (position, rule) in registry.iter().enumerate() {
            write!(out, "  {:>2}. ", position + 1)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, "{}", rule.name())?;
            out.reset()?;
            writeln!(out, "  {}", rule.pattern().as_str())?;
        }
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_record(out: &mut dyn WriteColor, record: &Record) -> io::Result<()> {
    write!(out, "{:>6}  ", record.line)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "{}", record.rule)?;
    out.reset()?;
    for (name, value) in &record.fields {
        match value {
            Some(value) => write!(out, " {name}={value:?}")?,
            None => write!(out, " {name}=-")?,
        }
    }
    writeln!(out)
}
