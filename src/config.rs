//! Rule file parsing and compilation

pub mod rule_file;
pub mod rule_set;

pub use rule_file::{RuleEntry, RuleFile, ScannerSection};
pub use rule_set::RuleSet;
