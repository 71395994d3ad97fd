//! Transfer record type for the transfer index
//!
//! This module defines the record shape consumed from the upstream explorer.
//! Only the sender, recipient and value fields are interpreted; everything
//! else the explorer sends is carried through as opaque detail.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Position of a record inside a batch (0-based, ingestion order)
pub type Position = usize;

/// One token transfer as reported by the upstream explorer
///
/// The wire names `from`, `to` and `value` map onto `sender`, `recipient`
/// and `value`. Every other field (block number, hash, timestamps, gas and
/// token metadata) lands in `details` and is serialized back untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Sending address
    #[serde(rename = "from", default)]
    pub sender: String,

    /// Receiving address
    #[serde(rename = "to", default)]
    pub recipient: String,

    /// Transferred amount as a decimal-integer string
    ///
    /// Kept verbatim: the value index keys on the literal string and numeric
    /// comparisons parse it on demand.
    #[serde(default)]
    pub value: String,

    /// Pass-through payload
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl TransferRecord {
    /// Create a record with no detail fields
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            value: value.into(),
            details: Map::new(),
        }
    }

    /// Attach a detail field, builder style
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Read a detail field as text
    ///
    /// Strings are returned as-is, other scalars are rendered as JSON;
    /// missing fields and `null` yield `None`.
    pub fn detail_text(&self, key: &str) -> Option<String> {
        match self.details.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
