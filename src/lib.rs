//! Transfer Index Library
//! # Overview
//!
//! This library keeps an in-memory, immutable batch of token transfers
//! together with secondary indexes by sender, recipient and literal value,
//! and answers filtered, paginated queries against it. A new batch replaces
//! the old one atomically, so readers always see one complete batch.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TransferRecord, LedgerAmount, QueryFilter, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Indexing and query logic:
//!   - [`core::batch`] - Immutable batch plus position indexes
//!   - [`core::store`] - Current-batch holder with atomic replace
//!   - [`core::query`] - Filters, intersection and pagination
//!   - [`core::engine`] - `TransferIndex` facade
//!   - [`core::refresh`] - Periodic refresh from a `RecordSource`
//! - [`io`] - Explorer payload decoding and result output
//! - [`strategy`] - One-shot and watch run modes
//!
//! # Query Priority
//!
//! Exactly one predicate applies per query, chosen in this order:
//!
//! - **Sender and recipient**: both addresses match (index intersection)
//! - **Sender**: sender address matches
//! - **Recipient**: recipient address matches
//! - **Above value**: numeric value strictly greater than the threshold
//! - **All**: every record in ingestion order
//!
//! Offset and limit are applied to the filtered result.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{IndexedBatch, IngestSummary, RecordSource, Store, TransferIndex};
pub use io::{decode_response, write_records, FileSource, OutputFormat};
pub use types::{IndexError, LedgerAmount, Pagination, QueryFilter, TransferRecord};
