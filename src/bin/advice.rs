//! Advice CLI Binary
//!
//! Command-line interface for resolving agent subscriptions and listing matched advisories.

use advice::logging::init_logging;
use advice::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match CliContext::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let context = match CliContext::from_config(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error opening stores: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
