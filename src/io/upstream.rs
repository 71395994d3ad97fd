//! Ledger explorer payload decoding
//!
//! The explorer wraps every answer in an envelope:
//!
//! ```text
//! {"status": "1", "message": "OK", "result": [ {...}, {...} ]}
//! ```
//!
//! On success `result` is an array of transfer records. Errors keep the same
//! envelope but put a diagnostic string in `result` instead, e.g.
//! `{"status": "0", "message": "NOTOK", "result": "Invalid API Key"}`.
//! An empty page is reported as status `"0"` with an empty array, which is
//! a valid (empty) batch rather than an error.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{IndexError, TransferRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Raw response envelope
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    result: Value,
}

/// Decode an explorer response body into a complete batch
///
/// # Errors
///
/// - `DecodeError` if the body is not a JSON envelope or a record is not an object
/// - `UpstreamRejected` if `result` carries a diagnostic instead of records
pub fn decode_response(body: &[u8]) -> Result<Vec<TransferRecord>, IndexError> {
    let envelope: ApiEnvelope = serde_json::from_slice(body)?;

    match envelope.result {
        Value::Array(items) => {
            debug!(
                status = %envelope.status,
                message = %envelope.message,
                records = items.len(),
                "decoded explorer page"
            );
            items
                .into_iter()
                .enumerate()
                .map(|(position, item)| {
                    serde_json::from_value(item).map_err(|e| IndexError::DecodeError {
                        message: format!("record {}: {}", position, e),
                    })
                })
                .collect()
        }
        Value::String(detail) => Err(IndexError::upstream_rejected(&envelope.message, &detail)),
        other => Err(IndexError::upstream_rejected(
            &envelope.message,
            &other.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ok_page() {
        let body = br#"{
            "status": "1",
            "message": "OK",
            "result": [
                {"blockNumber": "1", "hash": "0x01", "from": "a", "to": "b", "value": "10"},
                {"blockNumber": "2", "hash": "0x02", "from": "b", "to": "c", "value": "20"}
            ]
        }"#;

        let records = decode_response(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sender, "a");
        assert_eq!(records[1].recipient, "c");
        assert_eq!(records[1].detail_text("hash").as_deref(), Some("0x02"));
    }

    #[test]
    fn test_decode_no_transactions_found_is_empty_batch() {
        let body = br#"{"status": "0", "message": "No transactions found", "result": []}"#;
        assert!(decode_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejected_request() {
        let body = br#"{"status": "0", "message": "NOTOK", "result": "Invalid API Key"}"#;
        assert_eq!(
            decode_response(body).unwrap_err(),
            IndexError::upstream_rejected("NOTOK", "Invalid API Key")
        );
    }

    #[test]
    fn test_decode_null_result_is_rejected() {
        let body = br#"{"status": "0", "message": "NOTOK", "result": null}"#;
        assert!(matches!(
            decode_response(body).unwrap_err(),
            IndexError::UpstreamRejected { .. }
        ));
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(matches!(
            decode_response(b"{\"status\": ").unwrap_err(),
            IndexError::DecodeError { .. }
        ));
    }

    #[test]
    fn test_decode_missing_result() {
        assert!(matches!(
            decode_response(br#"{"status": "1", "message": "OK"}"#).unwrap_err(),
            IndexError::DecodeError { .. }
        ));
    }

    #[test]
    fn test_decode_non_object_record_fails_whole_batch() {
        let body = br#"{"status": "1", "message": "OK", "result": [{"from": "a"}, 42]}"#;
        let err = decode_response(body).unwrap_err();
        assert!(matches!(err, IndexError::DecodeError { ref message } if message.starts_with("record 1")));
    }
}
