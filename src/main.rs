// src/main.rs

use clap::Parser;
use tracing::error;

use ppsched::cli::Args;
use ppsched::logging::init_logging;
use ppsched::{EXIT_FAILURE, run};

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_level) {
        eprintln!("failed to initialise logging: {e}");
        std::process::exit(EXIT_FAILURE);
    }

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!(error = %e, "ppsched failed");
            std::process::exit(EXIT_FAILURE);
        }
    }
}
