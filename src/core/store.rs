//! Snapshot store holding the current indexed batch
//!
//! The `Store` owns a single reference to the most recently installed
//! `IndexedBatch`. Replacing it is a pointer swap under a short write lock;
//! reading it clones the `Arc` under a read lock. Batches themselves are
//! immutable, so no lock is held while a query runs.
//!
//! # Consistency
//!
//! A reader sees either the previous complete batch or the new complete
//! batch, never a mix: records and indexes travel together inside one
//! `IndexedBatch` behind one pointer. A reader that obtained the previous
//! batch keeps it alive until it is done; the batch is freed when its last
//! holder drops it.
//!
//! # Concurrent Replaces
//!
//! Replaces are not merged. Whichever `replace` takes the write lock last is
//! the one subsequent readers observe, and it carries the highest generation.

use crate::core::batch::IndexedBatch;
use crate::types::IndexError;
use parking_lot::RwLock;
use std::sync::Arc;

/// Lifecycle state of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// No batch installed yet
    Uninitialized,
    /// A batch is installed
    Ready,
}

/// An installed batch together with its generation number
///
/// Generations start at 1 for the first installed batch and increase by one
/// per replace.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Install sequence number
    pub generation: u64,
    /// The installed batch
    pub batch: Arc<IndexedBatch>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    current: Option<Arc<IndexedBatch>>,
}

/// Holder of the currently active batch
#[derive(Debug, Default)]
pub struct Store {
    slot: RwLock<Slot>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a batch as current, returning its generation
    ///
    /// Accepts either an owned batch or one already wrapped in an `Arc`.
    pub fn replace(&self, batch: impl Into<Arc<IndexedBatch>>) -> u64 {
        let batch = batch.into();
        let (generation, previous) = {
            let mut slot = self.slot.write();
            slot.generation += 1;
            (slot.generation, slot.current.replace(batch))
        };
        // Release our reference to the old batch outside the lock
        drop(previous);
        generation
    }

    /// The current batch, or `None` before the first replace
    pub fn current(&self) -> Option<Arc<IndexedBatch>> {
        self.slot.read().current.clone()
    }

    /// The current batch, or `NotYetIngested`
    pub fn try_current(&self) -> Result<Arc<IndexedBatch>, IndexError> {
        self.current().ok_or(IndexError::NotYetIngested)
    }

    /// The current batch with its generation
    pub fn snapshot(&self) -> Option<Snapshot> {
        let slot = self.slot.read();
        slot.current.as_ref().map(|batch| Snapshot {
            generation: slot.generation,
            batch: Arc::clone(batch),
        })
    }

    /// Generation of the current batch (0 before the first replace)
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Lifecycle state
    pub fn state(&self) -> StoreState {
        if self.slot.read().current.is_some() {
            StoreState::Ready
        } else {
            StoreState::Uninitialized
        }
    }
}
