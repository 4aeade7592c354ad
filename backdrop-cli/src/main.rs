// backdrop-cli/src/main.rs
//
// Entry point for the `backdrop` binary.
//
// Responsibilities:
// - Parsing command-line arguments.
// - Initializing logging and installing the terminal progress reporter.
// - Running the extraction and mapping errors to a red `Error:` line and
//   exit code 1.

use backdrop_cli::terminal::{self, CliReporter};
use backdrop_cli::{Cli, ExtractOutcome, logging, run_extract};
use backdrop_core::progress_reporting;
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    progress_reporting::set_progress_reporter(Box::new(CliReporter::new()));

    let result = run_extract(&cli);
    progress_reporting::clear_progress();
    progress_reporting::clear_progress_reporter();

    match result {
        Ok(outcome) => {
            log::debug!("Run finished: {:?}", outcome);
            if outcome == ExtractOutcome::Cancelled {
                log::info!("Cancelled before any background was finished");
            }
        }
        Err(e) => {
            log::debug!("Run failed: {:?}", e);
            terminal::print_fatal(&e.to_string());
            process::exit(1);
        }
    }
}
