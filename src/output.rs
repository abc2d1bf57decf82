//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;

use crate::engine::ScanReport;
use crate::rules::RuleRegistry;
use crate::scanner::Record;
use crate::types::Hits;

/// Hit count for one rule, in registry order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHits {
    pub rule: String,
    pub pattern: String,
    pub hits: u64,
}

/// Everything the formatters print about one scan
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub scanner: String,
    pub rules: Vec<RuleHits>,
    pub records: Vec<Record>,
    pub report: ScanReport,
}

impl ScanSummary {
    /// Collects per-rule hits in registry order
    pub fn new<S: 'static>(
        scanner: impl Into<String>,
        registry: &RuleRegistry<S>,
        hits: &Hits,
        records: Vec<Record>,
        report: ScanReport,
    ) -> Self {
        let rules = registry
            .iter()
            .map(|rule| RuleHits {
                rule: rule.name().to_string(),
                pattern: rule.pattern().as_str().to_string(),
                hits: hits.get(rule.name().as_str()),
            })
            .collect();

        Self {
            scanner: scanner.into(),
            rules,
            records,
            report,
        }
    }
}
