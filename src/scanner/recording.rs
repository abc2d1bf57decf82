#![forbid(unsafe_code)]

//! Generic scanner state that records every match
//!
//! Rules declared in rule files have no user code behind them. Their handler
//! copies the named capture groups of each match into a [`Record`].

use crate::rules::{HandlerResult, MatchResult};
use crate::scanner::ScanState;
use crate::types::Hits;
use serde::Serialize;
use std::collections::BTreeMap;

/// One matched line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Rule that matched
    pub rule: String,
    /// 1-based line number
    pub line: usize,
    /// Named groups; `None` when the group did not participate in the match
    pub fields: BTreeMap<String, Option<String>>,
}

/// Hits plus (optionally) the records of every match
#[derive(Debug, Clone, Default)]
pub struct RecordingScanner {
    hits: Hits,
    records: Vec<Record>,
    keep_records: bool,
}

impl RecordingScanner {
    /// State that records matches
    pub fn new() -> Self {
        Self {
            keep_records: true,
            ..Self::default()
        }
    }

    /// State that only counts hits
    pub fn counting() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl ScanState for RecordingScanner {
    fn hits(&self) -> &Hits {
        &self.hits
    }

    fn hits_mut(&mut self) -> &mut Hits {
        &mut self.hits
    }
}

/// Handler used for rule-file rules
pub fn record_match(state: &mut RecordingScanner, m: &MatchResult<'_>) -> HandlerResult {
    if !state.keep_records {
        return Ok(());
    }

    let fields = m
        .named()
        .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
        .collect();
    state.records.push(Record {
        rule: m.rule().to_string(),
        line: m.line_number(),
        fields,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;
    use crate::rules::RegistryBuilder;

    #[test]
    fn test_records_named_groups() {
        let mut builder = RegistryBuilder::root("Recording", "");
        builder
            .declare("kv", "(?P<key>[a-z]+)=(?P<value>[a-z]*)(?P<bang>!)?", record_match)
            .unwrap();
        let registry = builder.build();

        let mut state = RecordingScanner::new();
        engine::run(&registry, &mut state, ["a=b", "nothing", "c=!"]).unwrap();

        let records = state.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rule, "kv");
        assert_eq!(records[0].line, 1);
        assert_eq!(records[0].fields["key"], Some("a".to_string()));
        assert_eq!(records[0].fields["bang"], None);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[1].fields["value"], Some(String::new()));
        assert_eq!(records[1].fields["bang"], Some("!".to_string()));
    }

    #[test]
    fn test_counting_keeps_no_records() {
        let mut builder = RegistryBuilder::root("Recording", "");
        builder.declare("any", "x", record_match).unwrap();
        let registry = builder.build();

        let mut state = RecordingScanner::counting();
        engine::run(&registry, &mut state, ["x", "xx"]).unwrap();
        assert!(state.records().is_empty());
        assert_eq!(state.hits().get("any"), 2);
    }

    #[test]
    fn test_record_serializes_absent_as_null() {
        let record = Record {
            rule: "r".to_string(),
            line: 4,
            fields: BTreeMap::from([
                ("a".to_string(), Some(String::new())),
                ("b".to_string(), None),
            ]),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"rule":"r","line":4,"fields":{"a":"","b":null}}"#);
    }
}
