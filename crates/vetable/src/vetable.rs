//! Main Vetable struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cases::{case_report, CaseReport};
use crate::error::Result;
use crate::input::{Decoder, DecoderConfig, SourceMetadata, Table};
use crate::profile::{profile, TableSummary};

/// Configuration for Vetable analysis.
#[derive(Debug, Clone, Default)]
pub struct VetableConfig {
    /// Decoder configuration.
    pub decoder: DecoderConfig,
}

/// Result of analyzing a spreadsheet file.
///
/// Value-only and immutable once constructed; a new upload produces a fresh
/// result rather than updating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Generic per-column profiles.
    pub summary: TableSummary,
    /// Veterinary case records and aggregated statistics.
    pub cases: CaseReport,
}

/// The main analysis engine.
///
/// One synchronous pass per file: decode, profile every column, then build
/// the case report. No state is shared between invocations.
pub struct Vetable {
    decoder: Decoder,
}

impl Vetable {
    /// Create a new engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(VetableConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: VetableConfig) -> Self {
        Self {
            decoder: Decoder::with_config(config.decoder),
        }
    }

    /// Decode a file and compute both summary layers.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (table, source) = self.decoder.decode_file(path)?;
        self.analyze_table(table, source)
    }

    /// Compute both summary layers for an already-decoded table.
    pub fn analyze_table(&self, table: Table, source: SourceMetadata) -> Result<AnalysisResult> {
        let summary = profile(&table)?;
        let cases = case_report(&table)?;

        Ok(AnalysisResult {
            source,
            summary,
            cases,
        })
    }
}

impl Default for Vetable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn create_csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_analyze_simple_csv() {
        let content = "Fecha,Enfermedad,Resultado\n\
                       2024-01-05,Brucelosis,Positivo\n\
                       2024-01-06,Brucelosis,Negativo\n\
                       2024-01-07,Rabia,Positivo\n";
        let file = create_csv_file(content);

        let vetable = Vetable::new();
        let result = vetable.analyze(file.path()).unwrap();

        assert_eq!(result.source.row_count, 3);
        assert_eq!(result.source.column_count, 3);
        assert_eq!(result.summary.total_rows, 3);
        assert_eq!(result.cases.stats.total_cases, 3);
        assert_eq!(result.cases.raw[0].date, "05-01-24");
    }

    #[test]
    fn test_analyze_result_serializes() {
        let content = "Enfermedad,Resultado\nBrucelosis,Positivo\n";
        let file = create_csv_file(content);

        let vetable = Vetable::new();
        let result = vetable.analyze(file.path()).unwrap();
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"total_cases\":1"));
        assert!(json.contains("\"positivity_rate\""));
    }
}
