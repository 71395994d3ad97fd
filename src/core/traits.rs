//! Core traits at the ingestion boundary
//!
//! The network client that talks to the ledger explorer lives outside this
//! crate. It plugs in through `RecordSource`, which hands over one fully
//! decoded batch per call.

use crate::types::{IndexError, TransferRecord};

/// Supplier of complete record batches
///
/// Implementations must either return the whole batch or an error; a
/// partially decoded batch must never be returned, since whatever comes
/// back is installed as the new current batch.
pub trait RecordSource: Send + Sync {
    /// Fetch and decode the next batch
    fn fetch(&self) -> Result<Vec<TransferRecord>, IndexError>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}
