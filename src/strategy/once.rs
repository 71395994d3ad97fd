//! One-shot run strategy
//!
//! Fetches a single batch, answers one query and exits. Everything happens on
//! the calling thread.

use crate::core::{RecordSource, TransferIndex};
use crate::io::{write_records, OutputFormat};
use crate::strategy::QueryStrategy;
use crate::types::{IndexError, QueryFilter};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Fetch once, query once
#[derive(Debug, Clone, Copy)]
pub struct OnceStrategy;

impl QueryStrategy for OnceStrategy {
    fn run(
        &self,
        source: Arc<dyn RecordSource>,
        filter: &QueryFilter,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<(), IndexError> {
        let index = TransferIndex::new();
        let summary = index.ingest(source.fetch()?);
        let results = index.query(filter)?;

        info!(
            origin = %source.describe(),
            indexed = summary.records,
            matched = results.len(),
            "query answered"
        );
        write_records(format, &results, output)
    }
}
