//! Reel CLI Binary
//!
//! Command-line interface for the local folder media viewer.

use clap::Parser;
use reel::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(&cli) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error initializing session: {}", e);
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
