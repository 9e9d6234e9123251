//! In-memory table representation and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Metadata about the decoded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (xlsx, csv, tsv, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was decoded.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been decoded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// An ordered sequence of uniform rows.
///
/// Column order is the insertion order of the header row and is canonical
/// for every row. Absent cells are represented by [`Value::Empty`], never by
/// a short row: decoders pad and truncate so that every row has exactly
/// `headers.len()` cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Column headers in canonical order.
    pub headers: Vec<String>,
    /// Row data (row-major order), one cell per header.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a new table, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Value>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            while row.len() < width {
                row.push(Value::Empty);
            }
            row.truncate(width);
        }
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&Value::Empty))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pads_short_rows() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![Value::Number(1.0)]],
        );
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][1], Value::Empty);
        assert_eq!(table.rows[0][2], Value::Empty);
    }

    #[test]
    fn test_new_truncates_long_rows() {
        let table = Table::new(
            vec!["a".to_string()],
            vec![vec![Value::Number(1.0), Value::Number(2.0)]],
        );
        assert_eq!(table.rows[0].len(), 1);
    }

    #[test]
    fn test_column_values_in_row_order() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Value::Number(1.0), Value::Text("x".to_string())],
                vec![Value::Number(2.0), Value::Text("y".to_string())],
            ],
        );
        let col: Vec<&Value> = table.column_values(0).collect();
        assert_eq!(col, vec![&Value::Number(1.0), &Value::Number(2.0)]);
    }
}
