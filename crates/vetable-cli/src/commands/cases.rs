//! Cases command - veterinary case aggregation and positivity rates.

use std::path::PathBuf;

use colored::Colorize;
use vetable::{QuartileStats, Vetable};

pub fn run(
    file: PathBuf,
    json: bool,
    limit: usize,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Aggregating".cyan().bold(),
        file.display().to_string().white()
    );

    let vetable = Vetable::new();
    let result = vetable.analyze(&file)?;
    let report = &result.cases;

    if let Some(ref path) = output {
        std::fs::write(path, serde_json::to_string_pretty(report)?)?;
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let stats = &report.stats;
    println!(
        "{} case records",
        stats.total_cases.to_string().white().bold()
    );
    println!();

    println!("{}", "Diseases".yellow().bold());
    for (disease, count) in stats.by_disease.iter().take(10) {
        let rate = stats
            .positivity_rate
            .get(disease)
            .map(|r| r.as_str())
            .unwrap_or("N/A");
        println!("  {:30} {:6}  positivity {}", disease, count, rate.red());
    }
    println!();

    println!("{}", "Results".yellow().bold());
    for (result_value, count) in stats.by_result.iter().take(10) {
        println!("  {:30} {:6}", result_value, count);
    }
    println!();

    println!("{}", "Distribution of counts".yellow().bold());
    print_box_plot("farms", &stats.box_plots.farms);
    print_box_plot("diseases", &stats.box_plots.diseases);
    print_box_plot("owners", &stats.box_plots.owners);
    println!();

    if verbose {
        println!("{}", "Records".yellow().bold());
        for record in report.raw.iter().take(limit) {
            println!(
                "  {:10} {:20} {:15} {:20} {}",
                record.date, record.farm, record.owner, record.disease, record.result
            );
        }
        if report.raw.len() > limit {
            println!("  ... {} more records", report.raw.len() - limit);
        }
    }

    Ok(())
}

fn print_box_plot(label: &str, stats: &QuartileStats) {
    println!(
        "  {:10} min {}  q1 {}  median {}  q3 {}  max {}",
        label, stats.min, stats.q1, stats.median, stats.q3, stats.max
    );
}
