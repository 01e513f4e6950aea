//! Replacement templates with positional `%s` placeholders.
//!
//! A template is split once into literal segments. Rendering interleaves those
//! segments with an ordered list of captured values, so the number of
//! placeholders is simply `segments - 1` and validation and substitution read
//! from the same structure.

use crate::errors::{Error, Result};
use regex::bytes::Regex;

const PLACEHOLDER: &[u8] = b"%s";

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Vec<u8>>,
}

impl Template {
    pub fn parse(template: &str) -> Self {
        let bytes = template.as_bytes();
        let mut segments = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i + PLACEHOLDER.len() <= bytes.len() {
            if &bytes[i..i + PLACEHOLDER.len()] == PLACEHOLDER {
                segments.push(bytes[start..i].to_vec());
                i += PLACEHOLDER.len();
                start = i;
            } else {
                i += 1;
            }
        }
        segments.push(bytes[start..].to_vec());

        Self { segments }
    }

    /// Number of `%s` placeholders in the template.
    pub fn placeholders(&self) -> usize {
        self.segments.len() - 1
    }

    /// Fills placeholders in order from `values`.
    ///
    /// A `None` value (a group that did not take part in the match) and any
    /// placeholder past the end of `values` render as empty.
    pub fn render(&self, values: &[Option<&[u8]>]) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                if let Some(Some(value)) = values.get(i - 1) {
                    out.extend_from_slice(value);
                }
            }
            out.extend_from_slice(segment);
        }
        out
    }
}

/// Checks that `search` captures exactly as many groups as `template` has
/// placeholders. Group 0 (the whole match) is not counted.
pub fn validate_placeholders(search: &Regex, template: &Template) -> Result<()> {
    let groups = search.captures_len() - 1;
    let placeholders = template.placeholders();
    if groups != placeholders {
        return Err(Error::PlaceholderMismatch {
            groups,
            placeholders,
        });
    }
    Ok(())
}
