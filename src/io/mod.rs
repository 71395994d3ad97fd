//! I/O module
//!
//! Handles explorer payload decoding and result output.
//!
//! # Components
//!
//! - `upstream` - Explorer envelope decoding into record batches
//! - `source` - File-backed `RecordSource`
//! - `output` - JSON and CSV result writers

pub mod output;
pub mod source;
pub mod upstream;

pub use output::{write_records, write_records_csv, write_records_json, OutputFormat, CSV_COLUMNS};
pub use source::FileSource;
pub use upstream::decode_response;
