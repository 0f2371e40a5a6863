// tracksmith-cli/src/main.rs
//
// Entry point for the `tracksmith` binary.
//
// Parses the arguments, sets up logging, runs the packaging pipeline and
// maps the outcome to the process exit code: 0 on success, 1 on any error.

use clap::Parser;
use std::process;
use tracksmith_cli::output::print_error;
use tracksmith_cli::{Cli, logging, run_package};
use tracksmith_core::CoreError;

fn main() {
    let args = Cli::parse();
    logging::init(args.verbose);

    match run_package(&args) {
        Ok(_) => process::exit(0),
        Err(CoreError::Validation(report)) => {
            for issue in report.issues() {
                print_error(&issue.to_string());
            }
            eprintln!("Exiting without side effects.");
            process::exit(1);
        }
        Err(e) => {
            log::debug!("Run failed: {:?}", e);
            print_error(&e.to_string());
            process::exit(1);
        }
    }
}
