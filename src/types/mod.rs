//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: The transfer record shape consumed from upstream
//! - `amount`: Signed big-integer amounts for value comparisons
//! - `filter`: Typed query filters and pagination
//! - `error`: Error types for the transfer index

pub mod amount;
pub mod error;
pub mod filter;
pub mod record;

pub use amount::{AmountParseError, LedgerAmount};
pub use error::IndexError;
pub use filter::{Pagination, QueryFilter, Selection};
pub use record::{Position, TransferRecord};
