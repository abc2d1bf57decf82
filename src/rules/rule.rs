#![forbid(unsafe_code)]

//! Compiled rules and the match object handed to handlers

use crate::error::BoxError;
use crate::types::RuleName;
use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Outcome of a handler invocation
pub type HandlerResult = Result<(), BoxError>;

/// A rule handler operating on scanner state `S`
///
/// Handlers are shared between every registry that inherits the rule, so they
/// are reference counted and must be `Send + Sync`.
pub type Handler<S> = Arc<dyn Fn(&mut S, &MatchResult<'_>) -> HandlerResult + Send + Sync>;

/// Maps a subtype's state to the embedded ancestor state
pub type Projection<S, P> = fn(&mut S) -> &mut P;

/// A successful match of one rule against one line
///
/// Group accessors keep the distinction between a group that did not take
/// part in the match (`None`) and one that matched the empty string
/// (`Some("")`).
pub struct MatchResult<'a> {
    rule: &'a RuleName,
    pattern: &'a Regex,
    line: &'a str,
    line_number: usize,
    captures: Captures<'a>,
}

impl<'a> MatchResult<'a> {
    /// Name of the rule that matched
    pub fn rule(&self) -> &'a RuleName {
        self.rule
    }

    /// 1-based position of the line in the scanned sequence
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The full input line
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Text covered by the whole pattern (always a prefix of the line)
    pub fn as_str(&self) -> &'a str {
        self.captures.get(0).map_or("", |m| m.as_str())
    }

    /// Named capture group, `None` when the group did not participate
    pub fn name(&self, group: &str) -> Option<&'a str> {
        self.captures.name(group).map(|m| m.as_str())
    }

    /// Positional capture group, `None` when it did not participate
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// Parses a named group; `Ok(None)` when the group did not participate
    pub fn parse<T: FromStr>(&self, group: &str) -> Result<Option<T>, T::Err> {
        self.name(group).map(str::parse).transpose()
    }

    /// All named groups in pattern order, with their values
    pub fn named(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + '_ {
        self.pattern
            .capture_names()
            .flatten()
            .map(|name| (name, self.name(name)))
    }

    /// Underlying `regex` captures
    pub fn captures(&self) -> &Captures<'a> {
        &self.captures
    }
}

impl fmt::Debug for MatchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("rule", &self.rule)
            .field("line_number", &self.line_number)
            .field("line", &self.line)
            .field("captures", &self.captures)
            .finish()
    }
}

/// A named, compiled pattern and its handler
pub struct Rule<S> {
    name: RuleName,
    pattern: Regex,
    handler: Handler<S>,
}

impl<S> Clone for Rule<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<S> fmt::Debug for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("handler", &"<fn>")
            .finish()
    }
}

impl<S: 'static> Rule<S> {
    pub(crate) fn new(name: RuleName, pattern: Regex, handler: Handler<S>) -> Self {
        Self {
            name,
            pattern,
            handler,
        }
    }

    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// The compiled, line-anchored pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Matches the rule against `line`, anchored at its start
    pub fn try_match<'a>(&'a self, line: &'a str, line_number: usize) -> Option<MatchResult<'a>> {
        self.pattern.captures(line).map(|captures| MatchResult {
            rule: &self.name,
            pattern: &self.pattern,
            line,
            line_number,
            captures,
        })
    }

    /// Invokes the handler
    pub fn apply(&self, state: &mut S, m: &MatchResult<'_>) -> HandlerResult {
        (self.handler)(state, m)
    }

    /// Re-targets this rule at a type that embeds `S`
    ///
    /// The compiled pattern is shared; the handler runs against the state
    /// returned by `project`.
    pub fn lift<T: 'static>(&self, project: Projection<T, S>) -> Rule<T> {
        let handler = Arc::clone(&self.handler);
        Rule {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            handler: Arc::new(move |outer: &mut T, m: &MatchResult<'_>| handler(project(outer), m)),
        }
    }
}
