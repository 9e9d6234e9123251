//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vetable: statistics for veterinary lab spreadsheets
#[derive(Parser)]
#[command(name = "vetable")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile every column of a spreadsheet (types, statistics, frequencies)
    Profile {
        /// Path to the data file (XLSX/XLS/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the analysis as JSON instead of a formatted summary
        #[arg(long)]
        json: bool,

        /// Write the JSON analysis to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Aggregate veterinary case records (diseases, farms, positivity rates)
    Cases {
        /// Path to the data file (XLSX/XLS/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the case report as JSON instead of a formatted summary
        #[arg(long)]
        json: bool,

        /// Maximum number of case records to display
        #[arg(short, long, default_value = "100")]
        limit: usize,

        /// Write the JSON case report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
