//! Transfer index facade
//!
//! This module provides the `TransferIndex` that ties ingestion and queries
//! together: `ingest` builds a fresh `IndexedBatch` and swaps it into the
//! `Store`; `query` takes one snapshot from the store and runs the query
//! engine against it from start to finish.
//!
//! `TransferIndex` is `Send + Sync` and all of its methods take `&self`, so
//! a single instance can be shared behind an `Arc` between a refresh task
//! and any number of concurrent readers.

use crate::core::batch::{IndexedBatch, IndexedField};
use crate::core::query;
use crate::core::store::{Snapshot, Store, StoreState};
use crate::types::{IndexError, QueryFilter, TransferRecord};
use std::sync::Arc;
use tracing::{debug, info};

/// Summary of one successful ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Generation assigned by the store
    pub generation: u64,
    /// Number of records in the batch
    pub records: usize,
    /// Distinct sender addresses
    pub senders: usize,
    /// Distinct recipient addresses
    pub recipients: usize,
    /// Distinct value strings
    pub values: usize,
}

/// Indexed view over the latest ingested batch
#[derive(Debug, Default)]
pub struct TransferIndex {
    store: Store,
}

impl TransferIndex {
    /// Create an index with no batch installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a batch from `records` and install it as current
    ///
    /// The previous batch is discarded once every in-flight reader is done
    /// with it. Callers must only pass a completely decoded batch.
    ///
    /// # Arguments
    ///
    /// * `records` - The full batch, in canonical (ingestion) order
    ///
    /// # Returns
    ///
    /// An `IngestSummary` with the new generation and index cardinalities
    pub fn ingest(&self, records: Vec<TransferRecord>) -> IngestSummary {
        let batch = IndexedBatch::build(records);
        let mut summary = IngestSummary {
            generation: 0,
            records: batch.len(),
            senders: batch.distinct(IndexedField::Sender),
            recipients: batch.distinct(IndexedField::Recipient),
            values: batch.distinct(IndexedField::Value),
        };

        summary.generation = self.store.replace(batch);
        info!(
            generation = summary.generation,
            records = summary.records,
            senders = summary.senders,
            recipients = summary.recipients,
            "installed new batch"
        );
        summary
    }

    /// Answer a query against the current batch
    ///
    /// Before the first ingestion this returns an empty result rather than
    /// an error.
    ///
    /// # Arguments
    ///
    /// * `filter` - Selection plus pagination window
    ///
    /// # Returns
    ///
    /// Owned copies of the matching records, taken from a single snapshot
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the applicable threshold is malformed.
    pub fn query(&self, filter: &QueryFilter) -> Result<Vec<TransferRecord>, IndexError> {
        let Some(snapshot) = self.store.snapshot() else {
            debug!("query before first ingestion, returning no records");
            return Ok(Vec::new());
        };

        let records = query::run(&snapshot.batch, filter)?;
        debug!(
            generation = snapshot.generation,
            returned = records.len(),
            "query answered"
        );
        Ok(records.into_iter().cloned().collect())
    }

    /// The current batch with its generation
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.store.snapshot()
    }

    /// The current batch
    ///
    /// # Errors
    ///
    /// Returns `NotYetIngested` if nothing has been ingested yet.
    pub fn current(&self) -> Result<Arc<IndexedBatch>, IndexError> {
        self.store.try_current()
    }

    /// Lifecycle state of the underlying store
    pub fn state(&self) -> StoreState {
        self.store.state()
    }

    /// Generation of the current batch (0 before the first ingestion)
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }
}
