//! The main entry point for the `mfrep` command-line application.
//!
//! Parses arguments, merges in an optional settings file, and hands the
//! request to the `mfrep` library.

use mfrep::cli::{self, Args};
use mfrep::config::{ConfigLoader, Settings};
use mfrep::{OutputFormatter, ReplaceRequest, RunContext, logging, run_replace};
use std::io;
use std::process;

fn run(args: Args) -> anyhow::Result<()> {
    let request = ReplaceRequest::from_args(&args.args)?;
    let ctx = RunContext::capture()?;

    let settings = match &args.config {
        Some(path) => {
            let resolved = ConfigLoader::find_config(path, ctx.working_dir())?;
            ConfigLoader::load_settings(&resolved)?
        }
        None => Settings::default(),
    };
    let options = settings.merge(args.path, args.recursive, args.details, args.silent);

    let request = request.with_selection(options.path, options.recursive);

    let report = run_replace(&request, &ctx)?;

    let formatter = OutputFormatter::new(options.details, options.silent);
    formatter.write_output(&mut io::stdout().lock(), &report)?;
    Ok(())
}

fn main() {
    let args = cli::parse_args();
    logging::init(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("mfrep: {err}");
        process::exit(1);
    }
}
