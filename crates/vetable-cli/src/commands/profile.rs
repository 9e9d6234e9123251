//! Profile command - per-column type inference and descriptive statistics.

use std::path::PathBuf;

use colored::Colorize;
use vetable::{ColumnProfile, Vetable};

pub fn run(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        file.display().to_string().white()
    );

    let vetable = Vetable::new();
    let result = vetable.analyze(&file)?;

    if let Some(ref path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&result)?)?;
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    println!(
        "{} rows, {} columns ({})",
        result.summary.total_rows.to_string().white().bold(),
        result.summary.total_columns.to_string().white().bold(),
        result.source.format
    );
    println!();

    let top_n = if verbose { 10 } else { 5 };

    for (name, profile) in &result.summary.columns {
        match profile {
            ColumnProfile::Numeric {
                count,
                min,
                max,
                mean,
                median,
                ..
            } => {
                println!("{} {}", name.yellow().bold(), "(numeric)".blue());
                println!(
                    "  count {}  min {}  max {}  mean {}  median {}",
                    count, min, max, mean, median
                );
            }
            ColumnProfile::Text { count, frequency } => {
                println!("{} {}", name.yellow().bold(), "(text)".blue());
                println!("  count {}", count);
                for (value, freq) in frequency.iter().take(top_n) {
                    let pct = *freq as f64 / result.summary.total_rows as f64 * 100.0;
                    println!("  {:30} {:6} {:5.1}%", value, freq, pct);
                }
                if frequency.len() > top_n {
                    println!("  ... {} more distinct values", frequency.len() - top_n);
                }
            }
        }
        println!();
    }

    Ok(())
}
