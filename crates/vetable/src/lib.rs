//! Vetable: statistics and aggregation engine for veterinary lab spreadsheets.
//!
//! Vetable decodes a spreadsheet of untyped records and computes two layers
//! of summary: a generic per-column profile (type inference, descriptive
//! statistics, frequency distributions) that works on any tabular dataset,
//! and a domain aggregation for veterinary case records (disease, farm,
//! owner, result; positivity rates; quartile distributions).
//!
//! # Core Principles
//!
//! - **Pure passes**: each table produces fresh summaries in one
//!   synchronous, side-effect-free pass; nothing is mutated afterward
//! - **Explicit coercion**: cells are classified through total functions,
//!   never ambient "is this numeric" checks
//! - **Graceful degradation**: unresolved columns and unparseable dates
//!   degrade per field instead of failing the whole analysis
//!
//! # Example
//!
//! ```no_run
//! use vetable::Vetable;
//!
//! let vetable = Vetable::new();
//! let result = vetable.analyze("casos_2025.xlsx").unwrap();
//!
//! println!("Rows: {}", result.summary.total_rows);
//! println!("Cases: {}", result.cases.stats.total_cases);
//! ```

pub mod cases;
pub mod error;
pub mod input;
pub mod profile;
pub mod stats;
pub mod value;

mod vetable;

pub use crate::vetable::{AnalysisResult, Vetable, VetableConfig};
pub use cases::{CaseRecord, CaseReport, CaseSummary};
pub use error::{Result, VetableError};
pub use input::{Decoder, DecoderConfig, SourceMetadata, Table};
pub use profile::{ColumnProfile, TableSummary};
pub use stats::QuartileStats;
pub use value::{Value, NOT_AVAILABLE};
