//! Settee cart CLI

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

mod cli;
mod observability;

#[expect(clippy::print_stderr, reason = "errors are reported on stderr")]
fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.logging) {
        eprintln!("failed to initialise logging: {error}");
        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
