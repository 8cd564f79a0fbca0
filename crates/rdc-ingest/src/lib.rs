//! Extract loading for retail dimension cleaning.
//!
//! - **csv_table**: CSV files as all-string tables
//! - **json**: columnar documents and record arrays
//! - **extract**: the `Extractor` seam and failure-tolerant extraction

pub mod csv_table;
pub mod error;
pub mod extract;
pub mod json;
pub mod table;

pub use csv_table::{read_csv_frame, read_csv_table};
pub use error::{IngestError, Result};
pub use extract::{Extractor, FileExtractor, RawInput, SourceFormat, extract_or_empty};
pub use json::{JsonShape, detect_shape, read_json_document, records_to_table};
pub use table::{RawTable, unique_headers};
