use std::fmt;
use thiserror::Error;

/// Which of the two user-supplied regular expressions failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// The `--path` filter.
    Path,
    /// The search expression given as the first positional argument.
    Search,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Path => f.write_str("path"),
            PatternKind::Search => f.write_str("search"),
        }
    }
}

/// Errors that abort the whole run before any file is touched.
///
/// Every variant here is fatal: the run stops and no summary is produced.
/// Failures scoped to a single file are reported through [`FileError`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Fewer than two positional arguments were given.
    #[error("search regex and replace string must be specified")]
    MissingArguments,

    /// The path filter or the search expression is not a valid regex.
    #[error("invalid {kind} regular expression: {source}")]
    InvalidRegex {
        kind: PatternKind,
        #[source]
        source: regex::Error,
    },

    /// The search expression and the replacement template disagree on arity.
    #[error(
        "number of search regexp groups ({groups}) must be equal to the number of \
         placeholders in replace string ({placeholders})"
    )]
    PlaceholderMismatch { groups: usize, placeholders: usize },

    /// The working directory could not be resolved or listed.
    #[error("failed to read working directory: {0}")]
    WorkingDirectoryUnavailable(#[source] std::io::Error),

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// An error that occurred while parsing a YAML settings file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A failure confined to one candidate file. Recorded, never propagated.
///
/// The failing path travels alongside in the file's outcome, so only the
/// cause is kept here.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

impl FileError {
    /// Classifies a read failure, splitting out permission problems.
    pub fn on_read(source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied,
            _ => FileError::Read(source),
        }
    }

    /// Classifies a write failure, splitting out permission problems.
    pub fn on_write(source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied,
            _ => FileError::Write(source),
        }
    }
}

/// A convenient type alias for `Result<T, mfrep::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn permission_errors_are_classified_separately() {
        let err = FileError::on_read(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, FileError::PermissionDenied));
        assert_eq!(err.to_string(), "permission denied");

        let err = FileError::on_write(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, FileError::PermissionDenied));
    }

    #[test]
    fn read_and_write_failures_stay_distinct() {
        let read = FileError::on_read(io::Error::from(io::ErrorKind::NotFound));
        let write = FileError::on_write(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(read, FileError::Read(_)));
        assert!(matches!(write, FileError::Write(_)));
        assert!(read.to_string().starts_with("read failed"));
        assert!(write.to_string().starts_with("write failed"));
    }

    #[test]
    fn invalid_regex_names_the_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = Error::InvalidRegex {
            kind: PatternKind::Path,
            source,
        };
        assert!(err.to_string().starts_with("invalid path regular expression"));
    }
}
