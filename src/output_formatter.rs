use crate::coordinator::RunReport;
use std::io::{self, Write};

/// Handles the rendering of a finished run to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    details: bool,
    silent: bool,
}

impl OutputFormatter {
    /// Creates a new `OutputFormatter`.
    ///
    /// # Arguments
    ///
    /// * `details` - Append one line per processed file after the summary.
    /// * `silent` - Print nothing at all. Takes precedence over `details`.
    pub fn new(details: bool, silent: bool) -> Self {
        Self { details, silent }
    }

    /// Writes the summary block and, if requested, the per-file lines.
    pub fn write_output<W: Write>(&self, writer: &mut W, report: &RunReport) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }

        let summary = report.summary();
        writeln!(writer, "\nSummary:")?;
        writeln!(writer, "Matching files: {}", summary.matching)?;
        writeln!(writer, "Files affected: {}", summary.affected)?;
        writeln!(writer, "Total replaces: {}", summary.replacements)?;
        writeln!(writer, "Errors: {}\n", summary.errors)?;

        if self.details && summary.matching != 0 {
            writeln!(writer, "Changes:")?;
            for line in report.detail_lines() {
                writeln!(writer, "{line}")?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
