//! Cell value representation and coercion.
//!
//! Spreadsheet cells arrive untyped: a cell is either a number, a piece of
//! text, or empty. Everything downstream (type inference, aggregation, case
//! extraction) goes through the explicit coercions defined here rather than
//! re-checking "is this numeric" ad hoc.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker used wherever a cell is empty or a column could not be resolved.
pub const NOT_AVAILABLE: &str = "N/A";

/// Excel's serial number for 1970-01-01 in the 1900 date system.
const UNIX_EPOCH_SERIAL: f64 = 25569.0;

/// Date shapes we accept for textual cells, paired with their chrono format.
/// First full parse wins; anything else passes through unchanged.
static DATE_FORMATS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), "%Y-%m-%d"), // ISO date
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(), "%m/%d/%Y"), // US date
        (Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap(), "%d-%m-%Y"), // European date
        (Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap(), "%Y/%m/%d"), // Alt ISO
    ]
});

/// A single untyped cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric cell as decoded from the spreadsheet.
    Number(f64),
    /// Textual cell.
    Text(String),
    /// Absent cell. Decoders must emit this instead of dropping the key.
    Empty,
}

impl Value {
    /// Attempt numeric coercion. Empty cells are never numeric candidates,
    /// and text that parses to NaN is rejected.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
            Value::Empty => None,
        }
    }

    /// Whether this cell counts as empty for profiling purposes.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty) || matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Display form of the cell. Integral numbers render without a decimal
    /// point so that `2` and `2.0` share one frequency key.
    pub fn display(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Empty => String::new(),
        }
    }
}

/// Render a number the way the frequency tables key it.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Format a cell as a `DD-MM-YY` date string.
///
/// Numeric cells are interpreted as Excel serial day counts (1900 date
/// system). Textual cells are matched against the known date shapes; text
/// that parses as none of them is returned unchanged rather than treated as
/// an error. Empty cells yield the [`NOT_AVAILABLE`] marker.
pub fn format_date(value: &Value) -> String {
    match value {
        Value::Empty => NOT_AVAILABLE.to_string(),
        Value::Number(serial) => {
            let millis = ((serial - UNIX_EPOCH_SERIAL) * 86_400_000.0).round() as i64;
            match DateTime::from_timestamp_millis(millis) {
                Some(dt) => dt.format("%d-%m-%y").to_string(),
                None => format_number(*serial),
            }
        }
        Value::Text(s) => {
            if s.is_empty() {
                return NOT_AVAILABLE.to_string();
            }
            let trimmed = s.trim();
            for (pattern, format) in DATE_FORMATS.iter() {
                if pattern.is_match(trimmed) {
                    if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                        return date.format("%d-%m-%y").to_string();
                    }
                }
            }
            s.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::Number(3.5).as_numeric(), Some(3.5));
        assert_eq!(Value::Text("42".to_string()).as_numeric(), Some(42.0));
        assert_eq!(Value::Text(" 1e3 ".to_string()).as_numeric(), Some(1000.0));
        assert_eq!(Value::Text("abc".to_string()).as_numeric(), None);
        assert_eq!(Value::Text("NaN".to_string()).as_numeric(), None);
        assert_eq!(Value::Text("".to_string()).as_numeric(), None);
        assert_eq!(Value::Empty.as_numeric(), None);
    }

    #[test]
    fn test_display_drops_trailing_zero() {
        assert_eq!(Value::Number(2.0).display(), "2");
        assert_eq!(Value::Number(2.5).display(), "2.5");
        assert_eq!(Value::Number(-7.0).display(), "-7");
        assert_eq!(Value::Text("2.0".to_string()).display(), "2.0");
    }

    #[test]
    fn test_format_date_serial() {
        // Serial 25569 is 1970-01-01.
        assert_eq!(format_date(&Value::Number(25569.0)), "01-01-70");
        // 2024-01-15 is serial 45306.
        assert_eq!(format_date(&Value::Number(45306.0)), "15-01-24");
        // Fractional serials carry a time-of-day component.
        assert_eq!(format_date(&Value::Number(45306.5)), "15-01-24");
    }

    #[test]
    fn test_format_date_strings() {
        assert_eq!(format_date(&Value::Text("2024-03-05".to_string())), "05-03-24");
        assert_eq!(format_date(&Value::Text("3/14/2024".to_string())), "14-03-24");
        assert_eq!(format_date(&Value::Text("05-03-2024".to_string())), "05-03-24");
        assert_eq!(format_date(&Value::Text("2024/03/05".to_string())), "05-03-24");
    }

    #[test]
    fn test_format_date_identity_on_unparseable() {
        // Non-date text must pass through unchanged, not error.
        assert_eq!(format_date(&Value::Text("pendiente".to_string())), "pendiente");
        assert_eq!(format_date(&Value::Text("15 de enero".to_string())), "15 de enero");
    }

    #[test]
    fn test_format_date_empty() {
        assert_eq!(format_date(&Value::Empty), NOT_AVAILABLE);
        assert_eq!(format_date(&Value::Text(String::new())), NOT_AVAILABLE);
    }
}
