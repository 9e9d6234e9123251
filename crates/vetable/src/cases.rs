//! Veterinary case aggregation: grouping, positivity rates, distributions.
//!
//! Lab exports name their columns inconsistently ("Fecha Diagnóstico",
//! "FECHA", "Granja o predio", ...), so the five case fields are located by
//! fuzzy header matching and every row is normalized into a [`CaseRecord`]
//! before aggregation.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VetableError};
use crate::input::Table;
use crate::stats::{frequency, quartiles, QuartileStats};
use crate::value::{format_date, Value, NOT_AVAILABLE};

/// Header substrings used to locate the case columns.
const TARGET_DATE: &str = "fecha";
const TARGET_FARM: &str = "granja";
const TARGET_FARM_FALLBACK: &str = "predio";
const TARGET_OWNER: &str = "propietario";
const TARGET_DISEASE: &str = "enfermedad";
const TARGET_RESULT: &str = "resultado";

/// A normalized veterinary case row.
///
/// Every field is a display string; [`NOT_AVAILABLE`] stands in when the
/// source column could not be resolved or the cell was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub date: String,
    pub farm: String,
    pub owner: String,
    pub disease: String,
    pub result: String,
}

/// Quartile statistics over the frequency-count distributions of the three
/// grouping categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlotStats {
    pub farms: QuartileStats,
    pub diseases: QuartileStats,
    pub owners: QuartileStats,
}

/// Aggregated statistics over a set of case records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSummary {
    /// Total number of case records.
    pub total_cases: usize,
    /// Case counts by disease, descending.
    pub by_disease: IndexMap<String, usize>,
    /// Case counts by result, descending.
    pub by_result: IndexMap<String, usize>,
    /// Case counts by farm, descending.
    pub by_farm: IndexMap<String, usize>,
    /// Case counts by owner, descending.
    pub by_owner: IndexMap<String, usize>,
    /// Positivity rate per disease as a percentage string ("60.0%").
    pub positivity_rate: IndexMap<String, String>,
    /// Count-distribution quartiles per category.
    pub box_plots: BoxPlotStats,
}

/// The domain output boundary: normalized records plus their summary.
///
/// Renderers take a bounded prefix of `raw` for display and read the
/// frequency/positivity/quartile fields of `stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub raw: Vec<CaseRecord>,
    pub stats: CaseSummary,
}

/// Resolve a target column by case-insensitive substring match.
///
/// Returns the first header (in header order) whose lowercase form contains
/// the lowercase target. When several headers share the substring the first
/// one wins; this ambiguity is accepted rather than tie-broken further.
pub fn resolve_column(headers: &[String], target: &str) -> Option<usize> {
    let needle = target.to_lowercase();
    headers
        .iter()
        .position(|h| h.to_lowercase().contains(&needle))
}

fn resolve_farm_column(headers: &[String]) -> Option<usize> {
    resolve_column(headers, TARGET_FARM).or_else(|| resolve_column(headers, TARGET_FARM_FALLBACK))
}

/// Map every row of a table to a normalized case record.
///
/// Columns are resolved once up front. A column that fails to resolve
/// degrades that field to [`NOT_AVAILABLE`] for every record instead of
/// aborting the aggregation.
pub fn build_case_records(table: &Table) -> Result<Vec<CaseRecord>> {
    if table.is_empty() {
        return Err(VetableError::EmptyTable(
            "cannot build case records from a table with no data".to_string(),
        ));
    }

    let date_col = resolve_column(&table.headers, TARGET_DATE);
    let farm_col = resolve_farm_column(&table.headers);
    let owner_col = resolve_column(&table.headers, TARGET_OWNER);
    let disease_col = resolve_column(&table.headers, TARGET_DISEASE);
    let result_col = resolve_column(&table.headers, TARGET_RESULT);

    let records = table
        .rows
        .iter()
        .map(|row| CaseRecord {
            date: match date_col {
                Some(col) => format_date(row.get(col).unwrap_or(&Value::Empty)),
                None => NOT_AVAILABLE.to_string(),
            },
            farm: field(row, farm_col),
            owner: field(row, owner_col),
            disease: field(row, disease_col),
            result: field(row, result_col),
        })
        .collect();

    Ok(records)
}

fn field(row: &[Value], col: Option<usize>) -> String {
    match col.and_then(|c| row.get(c)) {
        Some(value) if !value.is_empty() => value.display(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Whether a result string reports a positive outcome.
pub fn is_positive(result: &str) -> bool {
    let lower = result.to_lowercase();
    lower.contains("positivo") || lower.contains("detectado") || lower == "si"
}

/// Positivity rate per disease, formatted to one decimal place.
///
/// Groups are derived from the records present, in first-seen disease
/// order; a disease with zero cases never appears.
pub fn positivity_rate(records: &[CaseRecord]) -> IndexMap<String, String> {
    let mut groups: IndexMap<String, (usize, usize)> = IndexMap::new();
    for record in records {
        let (total, positive) = groups.entry(record.disease.clone()).or_insert((0, 0));
        *total += 1;
        if is_positive(&record.result) {
            *positive += 1;
        }
    }

    groups
        .into_iter()
        .map(|(disease, (total, positive))| {
            let rate = positive as f64 / total as f64 * 100.0;
            (disease, format!("{rate:.1}%"))
        })
        .collect()
}

/// Aggregate a set of case records into summary statistics.
pub fn case_summary(records: &[CaseRecord]) -> CaseSummary {
    let by_disease = frequency(records.iter().map(|r| r.disease.clone()));
    let by_result = frequency(records.iter().map(|r| r.result.clone()));
    let by_farm = frequency(records.iter().map(|r| r.farm.clone()));
    let by_owner = frequency(records.iter().map(|r| r.owner.clone()));

    let box_plots = BoxPlotStats {
        farms: count_quartiles(&by_farm),
        diseases: count_quartiles(&by_disease),
        owners: count_quartiles(&by_owner),
    };

    CaseSummary {
        total_cases: records.len(),
        positivity_rate: positivity_rate(records),
        by_disease,
        by_result,
        by_farm,
        by_owner,
        box_plots,
    }
}

/// Quartiles over the count values (not the keys) of a frequency map.
fn count_quartiles(freq: &IndexMap<String, usize>) -> QuartileStats {
    let mut counts: Vec<f64> = freq.values().map(|&c| c as f64).collect();
    counts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    quartiles(&counts)
}

/// Build the full domain report for a table: normalized records plus
/// aggregated statistics.
pub fn case_report(table: &Table) -> Result<CaseReport> {
    let raw = build_case_records(table)?;
    let stats = case_summary(&raw);
    Ok(CaseReport { raw, stats })
}
