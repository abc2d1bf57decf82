//! Line dispatch engine

pub mod executor;

pub use executor::{ScanReport, dispatch, run, run_reader};
