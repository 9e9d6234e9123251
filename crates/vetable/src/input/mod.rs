//! Input decoding and table representation.

mod decoder;
mod table;

pub use decoder::{Decoder, DecoderConfig};
pub use table::{SourceMetadata, Table};
