//! Vetable CLI - spreadsheet statistics for veterinary lab data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profile { file, json, output } => {
            commands::profile::run(file, json, output, cli.verbose)
        }

        Commands::Cases {
            file,
            json,
            limit,
            output,
        } => commands::cases::run(file, json, limit, output, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
