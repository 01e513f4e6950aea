//! `mfrep` is a library for regex-driven search and replace across many files.
//!
//! It provides the core logic for the `mfrep` command-line tool. The main
//! components are:
//!
//! - `template`: Parses `%s` replacement templates and checks them against the
//!   capture groups of the search pattern.
//! - `replacer`: Rewrites a single file, substituting every match.
//! - `selector`: Lists candidate files, flat or recursive, and filters them by
//!   a regex on their absolute path.
//! - `coordinator`: Runs the whole operation and collects per-file outcomes
//!   into a report.
//!
//! Files are processed one at a time in selection order. A failure on one file
//! is recorded and the run moves on.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod logging;
pub mod output_formatter;
pub mod replacer;
pub mod selector;
pub mod template;

// Re-export main types for easier access by library users.
pub use coordinator::{FileOutcome, ReplaceRequest, RunReport, RunSummary, run_replace};
pub use errors::{Error, FileError, Result};
pub use output_formatter::OutputFormatter;
pub use replacer::Replacer;
pub use selector::RunContext;
