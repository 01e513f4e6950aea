use crate::errors::FileError;
use crate::template::Template;
use regex::bytes::Regex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Core engine for substituting matches of one search pattern in a file.
///
/// A `Replacer` holds the compiled search expression and the parsed template.
/// Every match's capture groups (group 0 excluded) are fed positionally into
/// the template to produce the text that replaces it.
pub struct Replacer {
    search: Regex,
    template: Template,
}

/// The result of rewriting a buffer.
pub struct ReplaceResult {
    /// The new content.
    pub content: Vec<u8>,
    /// The number of matches that were substituted.
    pub replacements: usize,
}

impl Replacer {
    /// Creates a new `Replacer`. The caller is expected to have validated the
    /// pair with [`crate::template::validate_placeholders`].
    pub fn new(search: Regex, template: Template) -> Self {
        Self { search, template }
    }

    /// Substitutes every non-overlapping, leftmost-first match in `content`.
    pub fn replace_bytes(&self, content: &[u8]) -> ReplaceResult {
        let mut out = Vec::with_capacity(content.len());
        let mut last = 0;
        let mut replacements = 0;

        for caps in self.search.captures_iter(content) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let values: Vec<Option<&[u8]>> = caps
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_bytes()))
                .collect();

            out.extend_from_slice(&content[last..whole.start()]);
            out.extend_from_slice(&self.template.render(&values));
            last = whole.end();
            replacements += 1;
        }
        out.extend_from_slice(&content[last..]);

        ReplaceResult {
            content: out,
            replacements,
        }
    }

    /// Reads `path`, substitutes all matches, and rewrites the file in full.
    ///
    /// The file is rewritten even when nothing matched; the bytes are then
    /// unchanged. Returns the number of substitutions.
    pub fn process_file(&self, path: &Path) -> Result<usize, FileError> {
        let content = fs::read(path).map_err(FileError::on_read)?;
        let result = self.replace_bytes(&content);

        write_in_place(path, &result.content).map_err(FileError::on_write)?;

        debug!(path = %path.display(), replacements = result.replacements, "rewrote file");
        Ok(result.replacements)
    }
}

/// Truncates and rewrites `path` without renaming or replacing the inode.
fn write_in_place(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn replacer(pattern: &str, template: &str) -> Replacer {
        Replacer::new(Regex::new(pattern).unwrap(), Template::parse(template))
    }

    #[test]
    fn test_round_trip_example() {
        let result = replacer("(foo)", "bar-%s").replace_bytes(b"foo foo");
        assert_eq!(result.content, b"bar-foo bar-foo");
        assert_eq!(result.replacements, 2);
    }

    #[test]
    fn test_count_matches_non_overlapping() {
        let search = Regex::new("aa").unwrap();
        let result = replacer("aa", "b").replace_bytes(b"aaaaa");
        assert_eq!(result.content, b"bba");
        assert_eq!(result.replacements, search.find_iter(b"aaaaa").count());
    }

    #[test]
    fn test_groups_are_positional() {
        let result = replacer(r"(\w+)=(\w+)", "%s:%s").replace_bytes(b"a=1, b=2");
        assert_eq!(result.content, b"a:1, b:2");
        assert_eq!(result.replacements, 2);
    }

    #[test]
    fn test_optional_group_substitutes_empty() {
        let result = replacer("x(y)?", "<%s>").replace_bytes(b"xy x");
        assert_eq!(result.content, b"<y> <>");
        assert_eq!(result.replacements, 2);
    }

    #[test]
    fn test_raw_bytes_preserved() {
        let content = b"\xff\xfe foo \x00";
        let result = replacer("foo", "bar").replace_bytes(content);
        assert_eq!(result.content, b"\xff\xfe bar \x00");
    }

    #[test]
    fn test_process_file_rewrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "foo foo").unwrap();

        let count = replacer("(foo)", "bar-%s").process_file(&path).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "bar-foo bar-foo");
    }

    #[test]
    fn test_zero_matches_leaves_bytes_identical() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.bin");
        let original = b"nothing to see\r\n\x80\x81".to_vec();
        fs::write(&path, &original).unwrap();

        let count = replacer("zzz", "y").process_file(&path).unwrap();

        assert_eq!(count, 0);
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let err = replacer("a", "b").process_file(&path).unwrap_err();

        assert!(matches!(err, FileError::Read(_)));
        assert!(!path.exists());
    }
}
