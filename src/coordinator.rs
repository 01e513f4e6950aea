use crate::config::DEFAULT_PATH_PATTERN;
use crate::errors::{Error, FileError, PatternKind, Result};
use crate::replacer::Replacer;
use crate::selector::{self, DirectoryWalker, FsWalker, RunContext};
use crate::template::{self, Template};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Everything a run needs, taken from the command line and settings.
#[derive(Debug, Clone)]
pub struct ReplaceRequest {
    /// Regex searched for in file contents.
    pub search: String,
    /// Template with one `%s` per capture group of `search`.
    pub replace: String,
    /// Regex matched anywhere in each candidate's absolute path.
    pub path: String,
    /// Walk subdirectories instead of listing only the working directory.
    pub recursive: bool,
}

impl ReplaceRequest {
    /// Builds a request from free-form positional arguments.
    ///
    /// The first two arguments are the search pattern and the template; any
    /// further ones are ignored. The request selects every file in the working
    /// directory until [`ReplaceRequest::with_selection`] narrows it.
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [search, replace, ..] => Ok(Self {
                search: search.clone(),
                replace: replace.clone(),
                path: DEFAULT_PATH_PATTERN.to_string(),
                recursive: false,
            }),
            _ => Err(Error::MissingArguments),
        }
    }

    /// Sets the path filter and whether subdirectories are walked.
    pub fn with_selection(mut self, path: impl Into<String>, recursive: bool) -> Self {
        self.path = path.into();
        self.recursive = recursive;
        self
    }
}

/// What happened to one selected file.
#[derive(Debug)]
pub enum FileOutcome {
    Replaced { path: PathBuf, count: usize },
    Failed { path: PathBuf, error: FileError },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Replaced { path, count } => {
                write!(f, "{} - {} replaces", path.display(), count)
            }
            FileOutcome::Failed { path, error } => {
                write!(f, "{} - error ({})", path.display(), error)
            }
        }
    }
}

/// Aggregate counts for a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Files whose absolute path matched the path pattern.
    pub matching: usize,
    /// Files with at least one replacement.
    pub affected: usize,
    /// Replacements across all files.
    pub replacements: usize,
    /// Files that failed to read or write.
    pub errors: usize,
}

/// Outcomes of a completed run, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<FileOutcome>,
}

impl RunReport {
    fn record(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            matching: self.outcomes.len(),
            ..RunSummary::default()
        };
        for outcome in &self.outcomes {
            match outcome {
                FileOutcome::Replaced { count, .. } => {
                    summary.replacements += count;
                    if *count > 0 {
                        summary.affected += 1;
                    }
                }
                FileOutcome::Failed { .. } => summary.errors += 1,
            }
        }
        summary
    }

    /// One line per file: successes first, then failures, each group in
    /// processing order.
    pub fn detail_lines(&self) -> Vec<String> {
        let successes = self
            .outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Replaced { .. }));
        let failures = self
            .outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }));
        successes.chain(failures).map(ToString::to_string).collect()
    }
}

/// Compiles both expressions and checks the template before anything else.
fn prepare(request: &ReplaceRequest) -> Result<(Regex, Replacer)> {
    let path_pattern = Regex::new(&request.path).map_err(|source| Error::InvalidRegex {
        kind: PatternKind::Path,
        source,
    })?;
    let search =
        regex::bytes::Regex::new(&request.search).map_err(|source| Error::InvalidRegex {
            kind: PatternKind::Search,
            source,
        })?;

    let template = Template::parse(&request.replace);
    template::validate_placeholders(&search, &template)?;

    Ok((path_pattern, Replacer::new(search, template)))
}

/// The main entry point for a replace run against the real filesystem.
pub fn run_replace(request: &ReplaceRequest, ctx: &RunContext) -> Result<RunReport> {
    run_replace_with(request, ctx, &FsWalker)
}

/// Runs the replacement with a caller-supplied walker.
///
/// Fatal problems (bad regex, placeholder mismatch, unreadable working
/// directory) are returned before any file is opened. A failure on one file
/// is recorded in the report and processing moves on to the next.
pub fn run_replace_with(
    request: &ReplaceRequest,
    ctx: &RunContext,
    walker: &dyn DirectoryWalker,
) -> Result<RunReport> {
    let (path_pattern, replacer) = prepare(request)?;
    let candidates = selector::select_paths(ctx, walker, &path_pattern, request.recursive)?;

    let mut report = RunReport::default();
    for path in candidates {
        match replacer.process_file(&ctx.resolve(&path)) {
            Ok(count) => report.record(FileOutcome::Replaced { path, count }),
            Err(error) => {
                warn!(path = %path.display(), "{error}");
                report.record(FileOutcome::Failed { path, error });
            }
        }
    }

    let summary = report.summary();
    info!(
        matching = summary.matching,
        affected = summary.affected,
        replacements = summary.replacements,
        errors = summary.errors,
        "replace run finished"
    );
    Ok(report)
}
