//! Query engine over an indexed batch
//!
//! Stateless functions answering sender, recipient, sender+recipient, value
//! threshold and unfiltered queries against one `IndexedBatch`, plus the
//! pagination window applied to the filtered result.
//!
//! Results borrow from the batch. Callers hold the batch's `Arc` for as long
//! as they need the records, so a concurrent replace cannot invalidate them.

use crate::core::batch::{IndexedBatch, IndexedField};
use crate::types::{
    IndexError, LedgerAmount, Pagination, Position, QueryFilter, Selection, TransferRecord,
};
use tracing::{debug, warn};

/// Outcome of a threshold scan over the value index
#[derive(Debug, Clone, PartialEq)]
pub struct ValueScan<'a> {
    /// Records whose value is strictly above the threshold
    ///
    /// Grouped by value bucket; bucket order is unspecified, order within a
    /// bucket follows ingestion order.
    pub records: Vec<&'a TransferRecord>,

    /// One `DataQualityAnomaly` per value key that could not be parsed
    pub anomalies: Vec<IndexError>,
}

/// Records whose `field` equals `key`, in ingestion order
///
/// An unknown key is a valid "no results" answer, never an error.
pub fn by_field<'a>(
    batch: &'a IndexedBatch,
    field: IndexedField,
    key: &str,
) -> Vec<&'a TransferRecord> {
    resolve(batch, batch.positions(field, key))
}

/// Positions of records sent by `sender` to `recipient`
///
/// Walks the shorter candidate list and probes each record for the other
/// key, so the cost is O(min(|by sender|, |by recipient|)). The sender list
/// is walked only when strictly shorter; on a tie the recipient list is
/// walked. Both lists are ascending, so the result is too.
pub fn both_positions(batch: &IndexedBatch, sender: &str, recipient: &str) -> Vec<Position> {
    let from_sender = batch.positions(IndexedField::Sender, sender);
    let to_recipient = batch.positions(IndexedField::Recipient, recipient);

    let (candidates, probe_field, probe_key) = if from_sender.len() < to_recipient.len() {
        (from_sender, IndexedField::Recipient, recipient)
    } else {
        (to_recipient, IndexedField::Sender, sender)
    };

    candidates
        .iter()
        .copied()
        .filter(|&position| {
            batch
                .get(position)
                .is_some_and(|record| probe_field.key_of(record) == probe_key)
        })
        .collect()
}

/// Records sent by `sender` to `recipient`, in ingestion order
pub fn by_both_fields<'a>(
    batch: &'a IndexedBatch,
    sender: &str,
    recipient: &str,
) -> Vec<&'a TransferRecord> {
    let positions = both_positions(batch, sender, recipient);
    resolve(batch, &positions)
}

/// Scan the value index for keys strictly greater than `threshold`
///
/// Keys that do not parse as integers are skipped and reported in
/// `anomalies`; the rest of the scan is unaffected.
pub fn scan_value_above<'a>(batch: &'a IndexedBatch, threshold: &LedgerAmount) -> ValueScan<'a> {
    let mut records = Vec::new();
    let mut anomalies = Vec::new();

    for (key, positions) in batch.index(IndexedField::Value) {
        match key.parse::<LedgerAmount>() {
            Ok(value) if value > *threshold => {
                records.extend(positions.iter().filter_map(|&p| batch.get(p)));
            }
            Ok(_) => {}
            Err(e) => anomalies.push(IndexError::data_quality_anomaly(key, e)),
        }
    }

    ValueScan { records, anomalies }
}

/// Records whose numeric value is strictly greater than `threshold`
///
/// # Errors
///
/// Returns `InvalidArgument` if `threshold` is not an integer. Unparsable
/// stored values are logged as data-quality anomalies and skipped.
pub fn by_value_above<'a>(
    batch: &'a IndexedBatch,
    threshold: &str,
) -> Result<Vec<&'a TransferRecord>, IndexError> {
    let parsed = threshold
        .parse::<LedgerAmount>()
        .map_err(|e| IndexError::invalid_argument("aboveValue", threshold, e))?;

    let scan = scan_value_above(batch, &parsed);
    for anomaly in &scan.anomalies {
        warn!(%anomaly, "skipping value bucket");
    }

    Ok(scan.records)
}

/// Every record in canonical order
pub fn all(batch: &IndexedBatch) -> Vec<&TransferRecord> {
    batch.records().iter().collect()
}

/// Window `items` by `page`
///
/// Offsets at or past the end yield an empty slice; the limit is clamped to
/// the remaining length.
pub fn paginate<T>(items: &[T], page: Pagination) -> &[T] {
    let (start, end) = page.bounds(items.len());
    &items[start..end]
}

/// Apply the filter's selection without pagination
///
/// Priority: sender AND recipient > sender > recipient > value threshold >
/// everything.
pub fn select<'a>(
    batch: &'a IndexedBatch,
    filter: &QueryFilter,
) -> Result<Vec<&'a TransferRecord>, IndexError> {
    let selection = filter.selection();
    let matched = match selection {
        Selection::SenderAndRecipient { sender, recipient } => {
            by_both_fields(batch, sender, recipient)
        }
        Selection::Sender(sender) => by_field(batch, IndexedField::Sender, sender),
        Selection::Recipient(recipient) => by_field(batch, IndexedField::Recipient, recipient),
        Selection::AboveValue(threshold) => by_value_above(batch, threshold)?,
        Selection::All => all(batch),
    };
    debug!(?selection, matched = matched.len(), "selected records");
    Ok(matched)
}

/// Apply the filter's selection, then its pagination window
///
/// Offsets are relative to the matched set, not to the whole batch.
pub fn run<'a>(
    batch: &'a IndexedBatch,
    filter: &QueryFilter,
) -> Result<Vec<&'a TransferRecord>, IndexError> {
    let matched = select(batch, filter)?;
    Ok(paginate(&matched, filter.pagination).to_vec())
}

fn resolve<'a>(batch: &'a IndexedBatch, positions: &[Position]) -> Vec<&'a TransferRecord> {
    positions.iter().filter_map(|&p| batch.get(p)).collect()
}
