//! Spreadsheet and delimited-text decoding.
//!
//! Turns an uploaded file into a [`Table`] of untyped cells. XLSX/XLS
//! workbooks go through calamine (first worksheet, first row as headers);
//! CSV/TSV files go through the csv crate with delimiter auto-detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use sha2::{Digest, Sha256};

use super::table::{SourceMetadata, Table};
use crate::error::{Result, VetableError};
use crate::value::Value;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Decoder configuration.
///
/// The first row is always treated as the header row; it defines the
/// canonical column order for the table.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Delimiter for CSV/TSV input (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
}

/// Decodes spreadsheet and delimited files into tables.
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with default configuration.
    pub fn new() -> Self {
        Self {
            config: DecoderConfig::default(),
        }
    }

    /// Create a decoder with custom configuration.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decode a file and return the table and its source metadata.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| VetableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| VetableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());
        let size_bytes = contents.len() as u64;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let (table, format) = match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => {
                (self.decode_workbook(path)?, ext.clone())
            }
            "csv" | "tsv" | "txt" => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents)?,
                };
                let format = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                }
                .to_string();
                (self.decode_delimited(&contents, delimiter)?, format)
            }
            other => {
                return Err(VetableError::UnsupportedFormat(format!(
                    "unknown extension '{other}' for {}",
                    path.display()
                )))
            }
        };

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Decode the first worksheet of an XLSX/XLS/ODS workbook.
    fn decode_workbook(&self, path: &Path) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| VetableError::EmptyTable("workbook has no sheets".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row
                .iter()
                .enumerate()
                .map(|(i, cell)| header_name(cell, i))
                .collect(),
            None => {
                return Err(VetableError::EmptyTable(
                    "worksheet has no header row".to_string(),
                ))
            }
        };

        let mut rows = Vec::new();
        for (row_idx, row) in rows_iter.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            rows.push(row.iter().map(cell_to_value).collect());
        }

        if rows.is_empty() {
            return Err(VetableError::EmptyTable("no data rows found".to_string()));
        }

        Ok(Table::new(headers, rows))
    }

    /// Decode delimited bytes directly.
    pub(crate) fn decode_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() {
            return Err(VetableError::EmptyTable("no columns found".to_string()));
        }

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(field_to_value).collect());
        }

        if rows.is_empty() {
            return Err(VetableError::EmptyTable("no data rows found".to_string()));
        }

        Ok(Table::new(headers, rows))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a workbook cell into a table value.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::String(s) if s.is_empty() => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::Bool(b) => Value::Text(b.to_string()),
        // Keep the raw serial so date formatting can interpret it.
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Value::Text(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(format!("{e:?}")),
    }
}

/// Convert a delimited-text field into a table value.
///
/// Numeric-looking fields become numbers so that delimited files behave the
/// same as workbook cells downstream.
fn field_to_value(field: &str) -> Value {
    if field.is_empty() {
        return Value::Empty;
    }
    match field.trim().parse::<f64>() {
        Ok(n) if !n.is_nan() => Value::Number(n),
        _ => Value::Text(field.to_string()),
    }
}

/// Header name for a cell, falling back to a positional name.
fn header_name(cell: &Data, index: usize) -> String {
    let name = cell_to_value(cell).display();
    if name.is_empty() {
        format!("column_{}", index + 1)
    } else {
        name
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Picks the delimiter with the most consistent per-line count, preferring
/// tab on ties since tabs rarely appear inside actual data.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(VetableError::EmptyTable("no lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_decode_delimited_types_cells() {
        let decoder = Decoder::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,,LA";
        let table = decoder.decode_delimited(data, b',').unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Value::Text("Alice".to_string())));
        assert_eq!(table.get(0, 1), Some(&Value::Number(30.0)));
        assert_eq!(table.get(1, 1), Some(&Value::Empty));
    }

    #[test]
    fn test_decode_delimited_pads_short_rows() {
        let decoder = Decoder::new();
        let data = b"a,b,c\n1,2\n";
        let table = decoder.decode_delimited(data, b',').unwrap();
        assert_eq!(table.get(0, 2), Some(&Value::Empty));
    }

    #[test]
    fn test_decode_delimited_empty_is_error() {
        let decoder = Decoder::new();
        let result = decoder.decode_delimited(b"a,b,c\n", b',');
        assert!(matches!(result, Err(VetableError::EmptyTable(_))));
    }

    #[test]
    fn test_max_rows_limits_decode() {
        let decoder = Decoder::with_config(DecoderConfig {
            max_rows: Some(1),
            delimiter: None,
        });
        let table = decoder.decode_delimited(b"a\n1\n2\n3\n", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }
}
