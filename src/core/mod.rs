//! Core indexing and query logic
//!
//! This module contains the in-memory indexing components:
//! - `batch` - Immutable batch of records plus its secondary indexes
//! - `store` - Holder of the current batch with atomic replace
//! - `query` - Stateless filters, intersection and pagination
//! - `engine` - `TransferIndex` facade tying ingestion and queries together
//! - `traits` - The `RecordSource` seam to the upstream client
//! - `refresh` - Asynchronous periodic refresh (tokio)

pub mod batch;
pub mod engine;
pub mod query;
pub mod refresh;
pub mod store;
pub mod traits;

pub use batch::{IndexedBatch, IndexedField, PositionIndex};
pub use engine::{IngestSummary, TransferIndex};
pub use refresh::{refresh_once, RefreshConfig, Refresher};
pub use store::{Snapshot, Store, StoreState};
pub use traits::RecordSource;
