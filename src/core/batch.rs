//! Immutable indexed batch of transfer records
//!
//! An `IndexedBatch` is built once per ingestion and never mutated afterwards.
//! It owns the records in ingestion order plus three secondary indexes mapping
//! a field value to the ascending positions of the records carrying it.
//!
//! # Index Invariant
//!
//! For every index and every key, the position list is strictly ascending and
//! contains exactly the positions whose record has that key. Since the indexes
//! are private and only built here, they cannot drift from `records`.

use crate::types::{Position, TransferRecord};
use std::collections::HashMap;

/// Secondary index: field value to ascending record positions
pub type PositionIndex = HashMap<String, Vec<Position>>;

/// Field a secondary index is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedField {
    /// The `from` address
    Sender,
    /// The `to` address
    Recipient,
    /// The literal value string
    Value,
}

impl IndexedField {
    /// Extract this field's key from a record
    pub fn key_of<'r>(&self, record: &'r TransferRecord) -> &'r str {
        match self {
            IndexedField::Sender => &record.sender,
            IndexedField::Recipient => &record.recipient,
            IndexedField::Value => &record.value,
        }
    }
}

/// Immutable snapshot of one ingested batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedBatch {
    records: Vec<TransferRecord>,
    by_sender: PositionIndex,
    by_recipient: PositionIndex,
    by_value: PositionIndex,
}

impl IndexedBatch {
    /// Build a batch and its indexes from records in ingestion order
    ///
    /// Empty input produces an empty batch. No sorting, deduplication or
    /// validation of field contents happens here.
    pub fn build(records: Vec<TransferRecord>) -> Self {
        let mut by_sender = PositionIndex::new();
        let mut by_recipient = PositionIndex::new();
        let mut by_value = PositionIndex::new();

        for (position, record) in records.iter().enumerate() {
            push_position(&mut by_sender, &record.sender, position);
            push_position(&mut by_recipient, &record.recipient, position);
            push_position(&mut by_value, &record.value, position);
        }

        Self {
            records,
            by_sender,
            by_recipient,
            by_value,
        }
    }

    /// All records in ingestion order
    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    /// Record at a position, if in range
    pub fn get(&self, position: Position) -> Option<&TransferRecord> {
        self.records.get(position)
    }

    /// Number of records in the batch
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The index for a field
    pub fn index(&self, field: IndexedField) -> &PositionIndex {
        match field {
            IndexedField::Sender => &self.by_sender,
            IndexedField::Recipient => &self.by_recipient,
            IndexedField::Value => &self.by_value,
        }
    }

    /// Positions whose record has `key` in `field`
    ///
    /// Unknown keys yield an empty slice.
    pub fn positions(&self, field: IndexedField, key: &str) -> &[Position] {
        self.index(field).get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys in a field's index
    pub fn distinct(&self, field: IndexedField) -> usize {
        self.index(field).len()
    }
}

fn push_position(index: &mut PositionIndex, key: &str, position: Position) {
    // Avoid allocating a fresh key for every record of a busy address
    match index.get_mut(key) {
        Some(positions) => positions.push(position),
        None => {
            index.insert(key.to_string(), vec![position]);
        }
    }
}
