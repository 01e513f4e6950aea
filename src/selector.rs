//! Candidate file selection.
//!
//! Enumeration and pattern matching sit behind two small traits,
//! [`DirectoryWalker`] and [`PatternMatcher`], so selection can be driven by
//! the real filesystem or by a fixed list in tests.

use crate::errors::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Process-wide state captured once at the start of a run.
#[derive(Debug, Clone)]
pub struct RunContext {
    working_dir: PathBuf,
}

impl RunContext {
    /// Captures the current working directory as an absolute path.
    pub fn capture() -> Result<Self> {
        let working_dir = env::current_dir().map_err(Error::WorkingDirectoryUnavailable)?;
        Ok(Self { working_dir })
    }

    /// Builds a context rooted at an explicit absolute directory.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolves a candidate's relative path against the working directory.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.working_dir.join(relative)
    }
}

/// Yields the relative paths of non-directory entries under `root`.
pub trait DirectoryWalker {
    fn walk(&self, root: &Path, recursive: bool) -> Result<Vec<PathBuf>>;
}

/// Tests whether a compiled pattern matches anywhere within a string.
pub trait PatternMatcher {
    fn is_match_in(&self, haystack: &str) -> bool;
}

impl PatternMatcher for Regex {
    fn is_match_in(&self, haystack: &str) -> bool {
        self.is_match(haystack)
    }
}

/// Filesystem-backed walker.
///
/// Flat mode lists the immediate entries of `root` sorted by name. Recursive
/// mode walks the whole subtree, parents before children and sorted by name
/// within each directory. Symlinks are reported as entries, never followed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWalker;

impl DirectoryWalker for FsWalker {
    fn walk(&self, root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        // The root has to be listable in both modes.
        let entries = fs::read_dir(root).map_err(Error::WorkingDirectoryUnavailable)?;

        if !recursive {
            let mut names = Vec::new();
            for entry in entries {
                let entry = entry.map_err(Error::WorkingDirectoryUnavailable)?;
                let file_type = entry.file_type().map_err(Error::WorkingDirectoryUnavailable)?;
                if !file_type.is_dir() {
                    names.push(PathBuf::from(entry.file_name()));
                }
            }
            names.sort();
            return Ok(names);
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            match entry.path().strip_prefix(root) {
                Ok(relative) => paths.push(relative.to_path_buf()),
                Err(_) => warn!(path = %entry.path().display(), "entry outside walk root"),
            }
        }
        Ok(paths)
    }
}

/// Lists candidate files and keeps those whose absolute path contains a match
/// of `path_pattern`. Enumeration order is preserved.
pub fn select_paths(
    ctx: &RunContext,
    walker: &dyn DirectoryWalker,
    path_pattern: &dyn PatternMatcher,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let candidates = walker.walk(ctx.working_dir(), recursive)?;
    let total = candidates.len();

    let selected: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|relative| {
            let absolute = ctx.resolve(relative);
            path_pattern.is_match_in(&absolute.to_string_lossy())
        })
        .collect();

    debug!(enumerated = total, selected = selected.len(), recursive, "selected candidate files");
    Ok(selected)
}
