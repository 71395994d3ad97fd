//! Run strategy module for the transfer index CLI
//!
//! A strategy owns the whole pipeline for one invocation: pull a batch from a
//! `RecordSource`, install it into a `TransferIndex`, evaluate a filter and
//! write the results. Strategies are selected at runtime from the CLI mode.

use crate::cli::ModeType;
use crate::core::RecordSource;
use crate::io::OutputFormat;
use crate::types::{IndexError, QueryFilter};
use std::io::Write;
use std::sync::Arc;

pub mod once;
pub mod watch;

pub use once::OnceStrategy;
pub use watch::{WatchConfig, WatchStrategy};

/// Run strategy trait for fetch, index and query pipelines
pub trait QueryStrategy: Send + Sync {
    /// Fetch from `source`, answer `filter` and write results to `output`
    ///
    /// # Arguments
    ///
    /// * `source` - Supplier of complete record batches
    /// * `filter` - Query to answer against each installed batch
    /// * `format` - Rendering for the result records
    /// * `output` - Mutable reference to a writer for the results
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every result set was written
    /// * `Err(IndexError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source cannot produce a batch (one-shot mode)
    /// - The background refresher crashed (watch mode)
    /// - The filter carries an invalid argument
    /// - Output cannot be written
    ///
    /// Records with unparsable values are logged and skipped, never fatal.
    fn run(
        &self,
        source: Arc<dyn RecordSource>,
        filter: &QueryFilter,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<(), IndexError>;
}

/// Create a run strategy for the requested mode
///
/// # Arguments
///
/// * `mode` - The run mode to create (Once or Watch)
/// * `config` - Optional watch mode configuration (ignored for Once, `None` means defaults)
///
/// # Returns
///
/// A boxed trait object implementing the QueryStrategy trait
pub fn create_strategy(mode: ModeType, config: Option<WatchConfig>) -> Box<dyn QueryStrategy> {
    match mode {
        ModeType::Once => Box::new(OnceStrategy),
        ModeType::Watch => Box::new(WatchStrategy::new(config.unwrap_or_default())),
    }
}
