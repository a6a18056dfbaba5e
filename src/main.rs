use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use jsonsheet::cli::{self, Args};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Set up logging
    cli::init_logging(args.log_level());
    log::debug!("Arguments: {:?}", args);

    if cli::run(&args)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
