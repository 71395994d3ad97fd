//! Watch run strategy
//!
//! Keeps the index refreshed on a fixed interval and re-answers the same
//! query after every successful refresh. Runs until the refresh cap is
//! reached or the process receives Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! WatchStrategy
//!     ├── WatchConfig (interval, worker_threads, max_refreshes)
//!     ├── tokio multi-thread runtime
//!     ├── Refresher task (fetch + build on the blocking pool)
//!     └── query loop (woken by the refresher's watch channel)
//! ```

use crate::core::{RecordSource, RefreshConfig, Refresher, TransferIndex};
use crate::io::{write_records, OutputFormat};
use crate::strategy::QueryStrategy;
use crate::types::{IndexError, QueryFilter};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Configuration for watch mode
#[derive(Clone, Debug)]
pub struct WatchConfig {
    /// Pause between two refreshes
    pub interval: Duration,
    /// Number of runtime worker threads
    pub worker_threads: usize,
    /// Stop after this many refresh attempts (`None` = until Ctrl-C)
    pub max_refreshes: Option<usize>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        let refresh = RefreshConfig::default();
        Self {
            interval: refresh.interval,
            worker_threads: num_cpus::get(),
            max_refreshes: refresh.max_refreshes,
        }
    }
}

impl WatchConfig {
    /// Create a WatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(interval: Duration, worker_threads: usize, max_refreshes: Option<usize>) -> Self {
        let default = Self::default();

        let interval = if interval.is_zero() {
            warn!(
                default_secs = default.interval.as_secs(),
                "invalid interval (0), using default"
            );
            default.interval
        } else {
            interval
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                default = default.worker_threads,
                "invalid worker_threads (0), using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            interval,
            worker_threads,
            max_refreshes,
        }
    }
}

/// Periodic refresh plus re-query
#[derive(Debug, Clone)]
pub struct WatchStrategy {
    config: WatchConfig,
}

impl WatchStrategy {
    /// Create a new WatchStrategy with the specified configuration
    pub fn new(config: WatchConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &WatchConfig {
        &self.config
    }
}

impl QueryStrategy for WatchStrategy {
    /// Write one result set per successful refresh
    ///
    /// Failed refreshes are logged and skipped; the previous results stay
    /// valid until the next successful one.
    fn run(
        &self,
        source: Arc<dyn RecordSource>,
        filter: &QueryFilter,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<(), IndexError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .enable_all()
            .build()?;

        runtime.block_on(async {
            let index = Arc::new(TransferIndex::new());
            let refresher = Refresher::new(
                Arc::clone(&index),
                source,
                RefreshConfig::new(self.config.interval, self.config.max_refreshes),
            );
            let mut updates = refresher.subscribe();
            let handle = refresher.spawn();

            let outcome = loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break Ok(());
                        }
                        let generation = updates
                            .borrow_and_update()
                            .map(|summary| summary.generation);

                        let results = match index.query(filter) {
                            Ok(results) => results,
                            Err(e) => break Err(e),
                        };
                        info!(?generation, matched = results.len(), "query re-answered");
                        if let Err(e) = write_records(format, &results, &mut *output) {
                            break Err(e);
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("interrupted, stopping watch");
                        break Ok(());
                    }
                }
            };

            handle.abort();
            match handle.await {
                Err(e) if e.is_panic() => Err(IndexError::task_failed(e)),
                // Finished, or cancelled by the abort above
                _ => outcome,
            }
        })
    }
}
