use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Tool for quick automated editing of file contents.
///
/// Every match of SEARCH_REGEXP in the selected files is replaced with
/// REPLACE_STRING, whose `%s` placeholders are filled, in order, from the
/// capture groups of the match.
#[derive(Parser, Debug)]
#[command(
    name = "mfrep",
    author,
    version,
    about = "Tool for quick automated editing of file contents.",
    override_usage = "mfrep [OPTIONS] <search_regexp> <replace_string>",
    after_help = "EXAMPLES:
  mfrep '(foo)' 'bar-%s'                 # foo -> bar-foo in the current directory
  mfrep -r -p '\\.rs$' 'v(\\d+)' 'V%s'    # every .rs file below the current directory
  mfrep -d -p 'notes' 'TODO' 'DONE'      # list each file and its replace count"
)]
pub struct Args {
    /// The search regexp followed by the replace string.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Regular expression to specify in which files the replace should be made.
    /// Matched anywhere in each file's absolute path. Defaults to `.*`.
    #[arg(short, long, value_name = "PATH_REGEXP", env = "MFREP_PATH")]
    pub path: Option<String>,

    /// List every matching file with its replace count or error.
    #[arg(short, long)]
    pub details: bool,

    /// Print no summary.
    #[arg(short, long)]
    pub silent: bool,

    /// Affect files in subdirectories too.
    #[arg(short, long)]
    pub recursive: bool,

    /// YAML settings file with defaults for the options above.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic logging on stderr (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
