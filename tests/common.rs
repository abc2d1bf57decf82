//! Test utilities for linescan integration tests
#![allow(dead_code)]

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Lines of the basic fixture, in order
pub const DATA_BASIC: &[&str] = &[
    "rule1 a b c",
    "rule2 7",
    "rule3 3",
    "rule1 k d h",
    "rule4",
    "rule2 10",
    "rule2 NOTNUM",
    "rule1 t m x NOTPARTOFMATCH",
    "rule3",
];

/// Lines of the base-pattern fixture, in order
pub const DATA_WITH_BASE: &[&str] = &[
    "2025-08-22T14:26:40.123456Z|INF|rule1",
    "2025-08-22T14:26:44.987654Z|WRN|rule2",
    "2025-08-22T14:26:50.142178Z|ERR|rule3",
];
