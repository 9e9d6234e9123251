//! Generic per-column profiling: type inference and descriptive statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VetableError};
use crate::input::Table;
use crate::stats::{frequency, mean, median};
use crate::value::{format_number, Value};

/// Share of numeric-coercible cells a column must exceed to count as
/// numeric. Strictly greater-than: exactly 80% stays text.
const NUMERIC_THRESHOLD: f64 = 0.8;

/// Profile of a single column, branched on the inferred type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnProfile {
    /// Column dominated by numeric values.
    Numeric {
        /// Number of cells that coerced to a number.
        count: usize,
        min: f64,
        max: f64,
        mean: f64,
        median: f64,
        /// Frequency of the numeric values as they appear (not binned).
        distribution: IndexMap<String, usize>,
    },
    /// Column treated as text.
    Text {
        /// Number of non-empty cells.
        count: usize,
        /// Frequency of the non-empty textual values.
        frequency: IndexMap<String, usize>,
    },
}

/// Per-column profiles for an entire table.
///
/// Constructed once per upload and never mutated; the next upload supersedes
/// it entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    /// Total number of data rows.
    pub total_rows: usize,
    /// Total number of columns.
    pub total_columns: usize,
    /// Profiles keyed by column name, in canonical column order.
    pub columns: IndexMap<String, ColumnProfile>,
}

/// Whether a column's values are predominantly numeric.
///
/// The decision is per-column over all rows: the count of non-empty,
/// numeric-coercible cells must exceed 80% of the total cell count.
pub fn is_numeric_column(values: &[&Value]) -> bool {
    let numeric_count = values.iter().filter(|v| v.as_numeric().is_some()).count();
    numeric_count as f64 > values.len() as f64 * NUMERIC_THRESHOLD
}

/// Profile every column of a table.
///
/// A zero-row table is a distinct failure ([`VetableError::EmptyTable`]),
/// never an empty-but-valid summary, so callers can show a "no data" state.
pub fn profile(table: &Table) -> Result<TableSummary> {
    if table.is_empty() || table.headers.is_empty() {
        return Err(VetableError::EmptyTable(
            "cannot profile a table with no data".to_string(),
        ));
    }

    let mut columns = IndexMap::new();

    for (index, header) in table.headers.iter().enumerate() {
        let values: Vec<&Value> = table.column_values(index).collect();
        columns.insert(header.clone(), profile_column(&values));
    }

    Ok(TableSummary {
        total_rows: table.row_count(),
        total_columns: table.column_count(),
        columns,
    })
}

fn profile_column(values: &[&Value]) -> ColumnProfile {
    if is_numeric_column(values) {
        // Stray non-coercible cells were already excluded here, so the
        // min/max folds never see NaN.
        let numeric: Vec<f64> = values.iter().filter_map(|v| v.as_numeric()).collect();
        let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
        let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        ColumnProfile::Numeric {
            count: numeric.len(),
            min,
            max,
            mean: mean(&numeric),
            median: median(&numeric),
            distribution: frequency(numeric.iter().map(|n| format_number(*n))),
        }
    } else {
        let non_empty: Vec<String> = values
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| v.display())
            .collect();

        ColumnProfile::Text {
            count: non_empty.len(),
            frequency: frequency(non_empty),
        }
    }
}
