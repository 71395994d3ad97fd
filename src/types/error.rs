//! Error types for the transfer index
//!
//! This module defines all error types that can occur while ingesting a batch
//! or answering a query against it.
//!
//! # Error Categories
//!
//! - **Caller Errors**: Malformed query arguments (e.g. a non-integer `aboveValue`)
//! - **Data Quality**: Stored values that cannot be compared numerically
//! - **Lifecycle**: Queries issued before any batch was ingested
//! - **Ingestion Errors**: Missing payload files, I/O failures, undecodable or rejected payloads

use thiserror::Error;

/// Main error type for the transfer index
///
/// Every core operation either succeeds or returns one of these variants.
/// None of them is meant to terminate the process; the caller decides how
/// to surface them (the CLI maps them to an exit code, an HTTP layer would
/// map `InvalidArgument` to a 400).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// A query argument supplied by the caller could not be interpreted
    ///
    /// Reported back to the caller, never retried.
    #[error("Invalid argument '{name}' = '{value}': {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        name: String,
        /// The raw value as supplied
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A stored value-index key is not a valid integer
    ///
    /// This is a recoverable condition - the bucket is skipped and the
    /// threshold query completes with the remaining buckets.
    #[error("Value key '{key}' is not a valid integer: {reason}")]
    DataQualityAnomaly {
        /// The stored value string
        key: String,
        /// Parser diagnostic
        reason: String,
    },

    /// No batch has been installed yet
    #[error("No batch has been ingested yet")]
    NotYetIngested,

    /// Payload file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading a payload or writing query output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The upstream payload is not valid JSON of the expected shape
    #[error("Decode error: {message}")]
    DecodeError {
        /// Description of the decoding failure
        message: String,
    },

    /// The upstream explorer answered with an error envelope
    #[error("Upstream rejected the request ({message}): {detail}")]
    UpstreamRejected {
        /// The envelope's `message` field (e.g. "NOTOK")
        message: String,
        /// The envelope's `result` field rendered as text
        detail: String,
    },

    /// A background refresh task could not be completed
    #[error("Background task failed: {message}")]
    TaskFailed {
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to IndexError
impl From<std::io::Error> for IndexError {
    fn from(error: std::io::Error) -> Self {
        IndexError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to IndexError
impl From<serde_json::Error> for IndexError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            return IndexError::IoError {
                message: error.to_string(),
            };
        }
        IndexError::DecodeError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to IndexError (output side only)
impl From<csv::Error> for IndexError {
    fn from(error: csv::Error) -> Self {
        IndexError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl IndexError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(name: &str, value: &str, reason: impl ToString) -> Self {
        IndexError::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a DataQualityAnomaly error
    pub fn data_quality_anomaly(key: &str, reason: impl ToString) -> Self {
        IndexError::DataQualityAnomaly {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        IndexError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an UpstreamRejected error
    pub fn upstream_rejected(message: &str, detail: &str) -> Self {
        IndexError::UpstreamRejected {
            message: message.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Create a TaskFailed error
    pub fn task_failed(message: impl ToString) -> Self {
        IndexError::TaskFailed {
            message: message.to_string(),
        }
    }

    /// Whether the error was caused by the caller's input
    pub fn is_caller_error(&self) -> bool {
        matches!(self, IndexError::InvalidArgument { .. })
    }
}
