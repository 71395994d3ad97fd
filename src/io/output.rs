//! Query result serialization
//!
//! Two renderings are supported:
//! - JSON: an array of records, each with its full pass-through payload
//! - CSV: a fixed column set for spreadsheets and shell pipelines
//!
//! Both write to any `Write` sink so tests can capture output in memory.

use crate::types::{IndexError, TransferRecord};
use clap::ValueEnum;
use std::io::Write;

/// Columns emitted by the CSV writer, in order
pub const CSV_COLUMNS: [&str; 7] = [
    "hash",
    "blockNumber",
    "timeStamp",
    "from",
    "to",
    "value",
    "tokenSymbol",
];

/// Output rendering for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    #[default]
    Json,
    /// CSV with a header row
    Csv,
}

/// Write records as a pretty-printed JSON array followed by a newline
pub fn write_records_json(
    records: &[TransferRecord],
    output: &mut dyn Write,
) -> Result<(), IndexError> {
    serde_json::to_writer_pretty(&mut *output, records)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

/// Write records as CSV
///
/// Columns follow `CSV_COLUMNS`. Detail fields missing from a record are
/// written as empty cells.
pub fn write_records_csv(
    records: &[TransferRecord],
    output: &mut dyn Write,
) -> Result<(), IndexError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(CSV_COLUMNS)?;

    for record in records {
        let detail = |key: &str| record.detail_text(key).unwrap_or_default();
        writer.write_record([
            detail("hash").as_str(),
            detail("blockNumber").as_str(),
            detail("timeStamp").as_str(),
            record.sender.as_str(),
            record.recipient.as_str(),
            record.value.as_str(),
            detail("tokenSymbol").as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write records in the requested format
pub fn write_records(
    format: OutputFormat,
    records: &[TransferRecord],
    output: &mut dyn Write,
) -> Result<(), IndexError> {
    match format {
        OutputFormat::Json => write_records_json(records, output),
        OutputFormat::Csv => write_records_csv(records, output),
    }
}
