//! Periodic refresh of the transfer index
//!
//! Fetching a batch and building its indexes are both blocking work, so they
//! run on tokio's blocking pool. A failed fetch leaves the previously
//! installed batch untouched; the next tick simply tries again.
//!
//! # Architecture
//!
//! ```text
//! Refresher
//!     ├── RefreshConfig (interval, optional refresh cap)
//!     ├── Arc<dyn RecordSource> (fetch + decode, outside the core)
//!     ├── Arc<TransferIndex> (build + atomic swap)
//!     └── watch::Sender<Option<IngestSummary>> (latest successful refresh)
//! ```

use crate::core::engine::{IngestSummary, TransferIndex};
use crate::core::traits::RecordSource;
use crate::types::IndexError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Default pause between two refreshes
const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for the refresh loop
#[derive(Clone, Debug)]
pub struct RefreshConfig {
    /// Pause between two refresh attempts
    pub interval: Duration,
    /// Stop after this many attempts (`None` = run until aborted)
    pub max_refreshes: Option<usize>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_refreshes: None,
        }
    }
}

impl RefreshConfig {
    /// Create a RefreshConfig with custom values
    ///
    /// A zero interval falls back to the default with a warning.
    pub fn new(interval: Duration, max_refreshes: Option<usize>) -> Self {
        let interval = if interval.is_zero() {
            warn!(
                default_secs = DEFAULT_INTERVAL.as_secs(),
                "invalid refresh interval (0), using default"
            );
            DEFAULT_INTERVAL
        } else {
            interval
        };

        Self {
            interval,
            max_refreshes,
        }
    }
}

/// Fetch one batch from `source` and install it into `index`
///
/// # Errors
///
/// Returns the source's error (the previous batch stays current) or
/// `TaskFailed` if the blocking task panicked.
pub async fn refresh_once(
    index: &Arc<TransferIndex>,
    source: &Arc<dyn RecordSource>,
) -> Result<IngestSummary, IndexError> {
    let index = Arc::clone(index);
    let source = Arc::clone(source);

    tokio::task::spawn_blocking(move || -> Result<IngestSummary, IndexError> {
        let records = source.fetch()?;
        Ok(index.ingest(records))
    })
    .await
    .map_err(IndexError::task_failed)?
}

/// Background task keeping the index in sync with a record source
pub struct Refresher {
    index: Arc<TransferIndex>,
    source: Arc<dyn RecordSource>,
    config: RefreshConfig,
    updates: watch::Sender<Option<IngestSummary>>,
}

impl Refresher {
    /// Create a refresher; nothing runs until `run` or `spawn`
    pub fn new(
        index: Arc<TransferIndex>,
        source: Arc<dyn RecordSource>,
        config: RefreshConfig,
    ) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            index,
            source,
            config,
            updates,
        }
    }

    /// Receiver notified after every successful refresh
    ///
    /// The channel closes when the refresher stops.
    pub fn subscribe(&self) -> watch::Receiver<Option<IngestSummary>> {
        self.updates.subscribe()
    }

    /// Run the refresh loop on the current task
    ///
    /// The first attempt happens immediately. Failures are logged and the
    /// loop carries on with the previous batch still installed.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let origin = self.source.describe();
        let mut attempts = 0usize;

        loop {
            if self
                .config
                .max_refreshes
                .is_some_and(|max| attempts >= max)
            {
                info!(attempts, "refresh cap reached, stopping");
                break;
            }
            ticker.tick().await;
            attempts += 1;

            match refresh_once(&self.index, &self.source).await {
                Ok(summary) => {
                    info!(
                        %origin,
                        generation = summary.generation,
                        records = summary.records,
                        "refreshed"
                    );
                    self.updates.send_replace(Some(summary));
                }
                Err(e) => {
                    warn!(%origin, error = %e, "refresh failed, keeping previous batch");
                }
            }
        }
    }

    /// Run the refresh loop as a tokio task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
