//! Integration tests for base patterns
//!
//! A base pattern prefixes every rule a type declares and is inherited by
//! subtypes that do not declare their own.

#[macro_use]
mod common;

use chrono::NaiveDateTime;
use common::DATA_WITH_BASE;
use linescan::{
    Declarations, HandlerResult, Hits, MatchResult, RegistryError, ScanError, ScanState, Scanner,
};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    timestamp: NaiveDateTime,
    level: String,
}

impl Entry {
    fn from_match(m: &MatchResult<'_>) -> Result<Self, linescan::BoxError> {
        let timestamp = m.name("timestamp").ok_or("timestamp not captured")?;
        Ok(Self {
            timestamp: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.6fZ")?,
            level: m.name("level").unwrap_or_default().to_string(),
        })
    }
}

fn base_pattern() -> String {
    [
        "(?P<timestamp>[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\\.[0-9]{6}Z)",
        "(?P<level>DBG|INF|WRN|ERR)",
    ]
    .iter()
    .map(|s| format!("{s}+\\|"))
    .collect()
}

#[derive(Debug, Default)]
struct ParserWithBase {
    hits: Hits,
    r1: Option<Entry>,
    r2: Option<Entry>,
}

impl ParserWithBase {
    fn rule1(&mut self, m: &MatchResult<'_>) -> HandlerResult {
        self.r1 = Some(Entry::from_match(m)?);
        Ok(())
    }

    fn rule2(&mut self, m: &MatchResult<'_>) -> HandlerResult {
        self.r2 = Some(Entry::from_match(m)?);
        Ok(())
    }
}

impl ScanState for ParserWithBase {
    fn hits(&self) -> &Hits {
        &self.hits
    }

    fn hits_mut(&mut self) -> &mut Hits {
        &mut self.hits
    }
}

impl Scanner for ParserWithBase {
    fn declare(decls: &mut Declarations<Self>) {
        decls
            .base_pattern(base_pattern())
            .rule("rule1", "rule1", Self::rule1)
            .rule("rule2", "rule2", Self::rule2);
    }
}

#[derive(Debug, Default)]
struct Sub {
    base: ParserWithBase,
    r3: Option<Entry>,
}

impl ScanState for Sub {
    fn hits(&self) -> &Hits {
        self.base.hits()
    }

    fn hits_mut(&mut self) -> &mut Hits {
        self.base.hits_mut()
    }
}

impl Scanner for Sub {
    fn declare(decls: &mut Declarations<Self>) {
        decls
            .extends::<ParserWithBase>(|s| &mut s.base)
            .rule("rule3", "rule3", |s: &mut Sub, m: &MatchResult<'_>| {
                s.r3 = Some(Entry::from_match(m)?);
                Ok(())
            });
    }
}

fn elapsed_seconds(from: &Entry, to: &Entry) -> f64 {
    (to.timestamp - from.timestamp).num_microseconds().unwrap_or_default() as f64 / 1e6
}

#[test]
fn test_base_pattern() {
    let mut p = ParserWithBase::default();
    assert_ok!(p.run(DATA_WITH_BASE));

    let r1 = assert_some!(p.r1.as_ref());
    let r2 = assert_some!(p.r2.as_ref());
    assert_eq!(r1.level, "INF");
    assert_eq!(r2.level, "WRN");

    let elapsed = elapsed_seconds(r1, r2);
    assert!(4.0 < elapsed && elapsed < 5.0, "elapsed {elapsed}");
}

#[test]
fn test_inherited_base_pattern() {
    let mut p = Sub::default();
    p.run(DATA_WITH_BASE).unwrap();

    let r3 = assert_some!(p.r3.as_ref());
    let r2 = assert_some!(p.base.r2.as_ref());
    assert_eq!(r3.level, "ERR");

    let elapsed = elapsed_seconds(r2, r3);
    assert!(5.0 < elapsed && elapsed < 6.0, "elapsed {elapsed}");
    assert_eq!(
        Sub::compiled().unwrap().base_pattern(),
        ParserWithBase::compiled().unwrap().base_pattern()
    );
}

#[test]
fn test_effective_pattern_is_base_then_body() {
    let registry = Sub::registry().unwrap();
    let expected = format!("^(?:{}.*rule3)", base_pattern());
    assert_eq!(registry.get("rule3").unwrap().pattern().as_str(), expected);
}

#[test]
fn test_lines_without_prefix_do_not_match() {
    let mut p = ParserWithBase::default();
    let report = p
        .run(["rule1", "INF|rule1", "2025-08-22T14:26:40.123456Z|XXX|rule1"])
        .unwrap();
    assert_eq!(report.matched, 0);
    assert!(p.r1.is_none());
}

#[test]
fn test_base_type_does_not_see_subtype_rules() {
    let mut p = ParserWithBase::default();
    p.run(DATA_WITH_BASE).unwrap();
    assert_eq!(p.hits().get("rule3"), 0);
    assert_eq!(p.hits().total(), 2);
}

/// Declares its own base; inherited rules keep the parent's prefix
#[derive(Debug, Default)]
struct Rebased {
    base: ParserWithBase,
    tagged: Vec<String>,
}

impl ScanState for Rebased {
    fn hits(&self) -> &Hits {
        self.base.hits()
    }

    fn hits_mut(&mut self) -> &mut Hits {
        self.base.hits_mut()
    }
}

impl Scanner for Rebased {
    fn declare(decls: &mut Declarations<Self>) {
        decls
            .extends::<ParserWithBase>(|s| &mut s.base)
            .base_pattern("\\[(?P<tag>[a-z]+)\\] ")
            .rule("rule3", "rule3", |s: &mut Rebased, m: &MatchResult<'_>| {
                s.tagged.push(m.name("tag").unwrap_or_default().to_string());
                Ok(())
            });
    }
}

#[test]
fn test_local_base_overrides_for_local_rules_only() {
    let mut p = Rebased::default();
    p.run([
        "[core] rule3",
        "2025-08-22T14:26:50.142178Z|ERR|rule3",
        "2025-08-22T14:26:40.123456Z|INF|rule1",
        "[core] rule1",
    ])
    .unwrap();

    assert_eq!(p.tagged, vec!["core".to_string()]);
    assert_eq!(p.hits().get("rule3"), 1);
    assert_eq!(p.hits().get("rule1"), 1);
    assert_eq!(
        Rebased::compiled().unwrap().base_pattern(),
        "\\[(?P<tag>[a-z]+)\\] "
    );
}

#[derive(Debug, Default)]
struct BrokenBase {
    hits: Hits,
}

impl ScanState for BrokenBase {
    fn hits(&self) -> &Hits {
        &self.hits
    }

    fn hits_mut(&mut self) -> &mut Hits {
        &mut self.hits
    }
}

impl Scanner for BrokenBase {
    fn declare(decls: &mut Declarations<Self>) {
        decls
            .base_pattern("(?P<unclosed>")
            .rule("any", "x", |_: &mut BrokenBase, _: &MatchResult<'_>| Ok(()));
    }
}

#[test]
fn test_invalid_base_pattern_is_a_build_error() {
    assert!(matches!(
        BrokenBase::registry(),
        Err(RegistryError::PatternCompile { .. })
    ));

    let mut b = BrokenBase::default();
    let err = b.run(["x"]).unwrap_err();
    assert!(matches!(
        err,
        ScanError::Registry(RegistryError::PatternCompile { .. })
    ));
    assert!(b.hits().is_empty());
}
