#![forbid(unsafe_code)]

//! Scanner types: state that can be scanned and type-level rule declarations
//!
//! A scanner is a plain struct that owns a [`Hits`] value and declares its
//! rules in [`Scanner::declare`]. Subtypes embed their parent's state and
//! inherit its rules with [`Declarations::extends`]. A subtype's
//! [`ScanState`] must forward to the embedded parent's `Hits`, so that hits
//! counted by the engine and hits read by inherited handlers are the same
//! counts:
//!
//! ```
//! use linescan::{Declarations, HandlerResult, Hits, MatchResult, ScanState, Scanner};
//!
//! #[derive(Default)]
//! struct Numbers {
//!     hits: Hits,
//!     values: Vec<u32>,
//! }
//!
//! impl Numbers {
//!     fn number(&mut self, m: &MatchResult<'_>) -> HandlerResult {
//!         self.values.extend(m.parse::<u32>("n")?);
//!         Ok(())
//!     }
//! }
//!
//! impl ScanState for Numbers {
//!     fn hits(&self) -> &Hits {
//!         &self.hits
//!     }
//!
//!     fn hits_mut(&mut self) -> &mut Hits {
//!         &mut self.hits
//!     }
//! }
//!
//! impl Scanner for Numbers {
//!     fn declare(decls: &mut Declarations<Self>) {
//!         decls.rule("number", "n=(?P<n>[0-9]+)", Self::number);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Words {
//!     numbers: Numbers,
//!     words: u32,
//! }
//!
//! impl ScanState for Words {
//!     fn hits(&self) -> &Hits {
//!         self.numbers.hits()
//!     }
//!
//!     fn hits_mut(&mut self) -> &mut Hits {
//!         self.numbers.hits_mut()
//!     }
//! }
//!
//! impl Scanner for Words {
//!     fn declare(decls: &mut Declarations<Self>) {
//!         decls
//!             .extends::<Numbers>(|w| &mut w.numbers)
//!             .rule("word", "[a-z]+", |w: &mut Words, _: &MatchResult<'_>| {
//!                 w.words += 1;
//!                 Ok(())
//!             });
//!     }
//! }
//!
//! let mut scanner = Words::default();
//! scanner.run(["n=4", "nothing", "x n=2"]).unwrap();
//! assert_eq!(scanner.numbers.values, vec![4, 2]);
//! assert_eq!(scanner.words, 1);
//! assert_eq!(scanner.numbers.hits().get("number"), 2);
//! assert_eq!(scanner.hits().get("word"), 1);
//! ```

mod cache;
mod declare;
mod recording;

pub use declare::{Compiled, Declarations};
pub use recording::{Record, RecordingScanner, record_match};

use crate::engine::{self, ScanReport};
use crate::error::{RegistryError, ScanError};
use crate::rules::RuleRegistry;
use crate::types::Hits;
use std::io::BufRead;

/// State the engine can record hits on
///
/// Types that embed an ancestor's state return the ancestor's `Hits` from
/// both methods rather than keeping a second copy.
pub trait ScanState {
    fn hits(&self) -> &Hits;

    fn hits_mut(&mut self) -> &mut Hits;
}

/// A scanner type with a compiled, inheritable rule registry
pub trait Scanner: ScanState + Sized + 'static {
    /// Declares ancestors, base pattern and rules for this type
    fn declare(decls: &mut Declarations<Self>);

    /// The compiled registry and base pattern, built once per process
    fn compiled() -> Result<&'static Compiled<Self>, RegistryError> {
        cache::compiled::<Self>()
    }

    /// The compiled registry, built once per process
    fn registry() -> Result<&'static RuleRegistry<Self>, RegistryError> {
        Self::compiled().map(Compiled::registry)
    }

    /// Builds a fresh registry, bypassing the process-wide cache
    fn build_registry() -> Result<Compiled<Self>, RegistryError> {
        cache::build::<Self>()
    }

    /// Scans `lines` with this type's registry
    fn run<I>(&mut self, lines: I) -> Result<ScanReport, ScanError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let registry = Self::registry()?;
        engine::run(registry, self, lines)
    }

    /// Scans every line of `reader` with this type's registry
    fn run_reader<R: BufRead>(&mut self, reader: R) -> Result<ScanReport, ScanError> {
        let registry = Self::registry()?;
        engine::run_reader(registry, self, reader)
    }
}
