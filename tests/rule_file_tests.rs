//! Integration tests for scanners declared in rule files
//!
//! These tests load the fixture rule files and scan the fixture logs.

#[macro_use]
mod common;

use common::{DATA_BASIC, DATA_WITH_BASE};
use linescan::config::RuleSet;
use linescan::scanner::RecordingScanner;
use linescan::{Hits, ScanState};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Helper function to get the fixtures directory path
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_rules(name: &str) -> RuleSet {
    let path = fixtures_dir().join("rules").join(name);
    RuleSet::load(&path).unwrap_or_else(|e| panic!("Failed to load rule file {}: {}", name, e))
}

#[test]
fn test_basic_rule_file_hits() {
    let rules = load_rules("basic.toml");
    assert_eq!(rules.name(), "basic");

    let mut state = RecordingScanner::new();
    assert_ok!(rules.run(&mut state, DATA_BASIC));

    let expected: Hits = [("rule1", 3), ("rule2", 2), ("rule3", 2)].into_iter().collect();
    assert_eq!(state.hits(), &expected);
}

#[test]
fn test_basic_rule_file_records() {
    let rules = load_rules("basic.toml");
    let mut state = RecordingScanner::new();
    rules.run(&mut state, DATA_BASIC).unwrap();

    let extras: Vec<Option<&str>> = state
        .records()
        .iter()
        .filter(|r| r.rule == "rule3")
        .map(|r| r.fields["extra"].as_deref())
        .collect();
    assert_eq!(extras, vec![Some("3"), None]);

    let triples: Vec<String> = state
        .records()
        .iter()
        .filter(|r| r.rule == "rule1")
        .map(|r| {
            ["first", "second", "third"]
                .iter()
                .map(|g| r.fields[*g].clone().unwrap_or_default())
                .collect::<Vec<_>>()
                .join("")
        })
        .collect();
    assert_eq!(triples, vec!["abc", "kdh", "tmx"]);

    let lines: Vec<usize> = state.records().iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 4, 6, 8, 9]);
}

#[test]
fn test_extended_rule_file() {
    let rules = load_rules("basic_sub.toml");
    assert_eq!(rules.name(), "basic-sub");

    let names: Vec<&str> = rules.registry().names().collect();
    assert_eq!(names, vec!["rule1", "rule2", "rule3", "rule4"]);

    let file = File::open(fixtures_dir().join("logs").join("basic.log")).unwrap();
    let mut state = RecordingScanner::counting();
    let report = rules.run_reader(&mut state, BufReader::new(file)).unwrap();

    assert_eq!(report.lines, 9);
    assert_eq!(report.matched, 8);
    assert_eq!(state.hits().get("rule4"), 1);
    assert!(state.records().is_empty());
}

#[test]
fn test_inherited_base_pattern_from_file() {
    let rules = load_rules("timestamped_sub.toml");
    assert_eq!(rules.name(), "timestamped_sub");
    assert_eq!(
        rules.base_pattern(),
        load_rules("timestamped.toml").base_pattern()
    );

    let mut state = RecordingScanner::new();
    rules.run(&mut state, DATA_WITH_BASE).unwrap();

    let levels: Vec<(&str, Option<&str>)> = state
        .records()
        .iter()
        .map(|r| (r.rule.as_str(), r.fields["level"].as_deref()))
        .collect();
    assert_eq!(
        levels,
        vec![
            ("rule1", Some("INF")),
            ("rule2", Some("WRN")),
            ("rule3", Some("ERR")),
        ]
    );

    let rule3 = assert_some!(state.records().iter().find(|r| r.rule == "rule3"));
    assert_eq!(
        rule3.fields["timestamp"].as_deref(),
        Some("2025-08-22T14:26:50.142178Z")
    );
}

#[test]
fn test_parent_file_unaffected_by_child() {
    let parent = load_rules("timestamped.toml");
    let _child = load_rules("timestamped_sub.toml");

    let mut state = RecordingScanner::new();
    parent.run(&mut state, DATA_WITH_BASE).unwrap();
    assert_eq!(state.hits().get("rule3"), 0);
    assert_eq!(state.hits().total(), 2);
}
