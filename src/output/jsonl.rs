#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. Record lines in scan order (when enabled)
//! 2. One hit line per rule, in registry order
//! 3. One status line

use crate::output::ScanSummary;
use crate::rules::RuleRegistry;
use serde::Serialize;
use std::collections::BTreeMap;

/// JSONL output formatter
pub struct JsonlFormatter {
    include_records: bool,
}

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        Self {
            include_records: false,
        }
    }

    /// Also emit one line per captured record
    pub fn with_records(mut self, include_records: bool) -> Self {
        self.include_records = include_records;
        self
    }

    /// Format a scan summary as JSONL
    pub fn format_scan(&self, summary: &ScanSummary) -> String {
        let mut output = String::new();

        if self.include_records {
            for record in &summary.records {
                push_line(
                    &mut output,
                    &RecordLine {
                        record_type: "record",
                        rule: &record.rule,
                        line: record.line,
                        fields: &record.fields,
                    },
                );
            }
        }

        for (position, rule) in summary.rules.iter().enumerate() {
            push_line(
                &mut output,
                &HitLine {
                    record_type: "hit",
                    rule: &rule.rule,
                    position,
                    hits: rule.hits,
                },
            );
        }

        push_line(
            &mut output,
            &StatusLine {
                record_type: "status",
                scanner: &summary.scanner,
                lines: summary.report.lines,
                matched: summary.report.matched,
                total_hits: summary.rules.iter().map(|r| r.hits).sum(),
            },
        );

        output
    }

    /// Format the effective rule order as JSONL
    pub fn format_rules<S: 'static>(
        &self,
        scanner: &str,
        base_pattern: &str,
        registry: &RuleRegistry<S>,
    ) -> String {
        let mut output = String::new();
        for (position, rule) in registry.iter().enumerate() {
            push_line(
                &mut output,
                &RuleLine {
                    record_type: "rule",
                    scanner,
                    position,
                    rule: rule.name().as_str(),
                    pattern: rule.pattern().as_str(),
                    base_pattern,
                },
            );
        }
        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_line<T: Serialize>(output: &mut String, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        output.push_str(&json);
        output.push('\n');
    }
}

#[derive(Debug, Serialize)]
struct RecordLine<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    rule: &'a str,
    line: usize,
    fields: &'a BTreeMap<String, Option<String>>,
}

#[derive(Debug, Serialize)]
struct HitLine<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    rule: &'a str,
    position: usize,
    hits: u64,
}

#[derive(Debug, Serialize)]
struct StatusLine<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    scanner: &'a str,
    lines: usize,
    matched: usize,
    total_hits: u64,
}

#[derive(Debug, Serialize)]
struct RuleLine<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    scanner: &'a str,
    position: usize,
    rule: &'a str,
    pattern: &'a str,
    base_pattern: &'a str,
}
